pub mod blocklist_repository;
pub mod ip_repository;
pub mod listing_store;
pub mod result_repository;
pub mod scan_state_repository;

pub use blocklist_repository::PgBlocklistRepository;
pub use ip_repository::PgIpRepository;
pub use listing_store::PgListingStore;
pub use result_repository::PgResultRepository;
pub use scan_state_repository::PgScanStateRepository;
