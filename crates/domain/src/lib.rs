//! blmonitor domain layer
pub mod blocklist;
pub mod config;
pub mod customer_range;
pub mod dnsbl_query;
pub mod errors;
pub mod listing;
pub mod scan_state;

pub use blocklist::{normalize_stem, BlockList};
pub use config::{CliOverrides, Config, ConfigError};
pub use customer_range::{customers_covering, CustomerRange};
pub use dnsbl_query::DnsblQuery;
pub use errors::DomainError;
pub use listing::{
    fanout_customers, is_state_change, ListingResult, RecordOutcome, UNKNOWN_CUSTOMER,
};
pub use scan_state::{pending_ips, scan_key, ScanState};
