mod blocklist_probe;
mod blocklist_repository;
mod ip_event_source;
mod ip_repository;
mod listing_store;
mod result_repository;
mod scan_state_repository;

pub use blocklist_probe::{BlocklistProbe, ProbeResult};
pub use blocklist_repository::BlocklistRepository;
pub use ip_event_source::IpEventSource;
pub use ip_repository::IpRepository;
pub use listing_store::{ListingStore, ListingTransaction};
pub use result_repository::ResultRepository;
pub use scan_state_repository::ScanStateRepository;
