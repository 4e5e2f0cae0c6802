//! Configuration module for blmonitor
//!
//! - `root`: main configuration, file loading and CLI overrides
//! - `database`: PostgreSQL connection settings
//! - `dns`: resolver used for DNSBL probes
//! - `logging`: logging settings
//! - `monitor`: change feed settings
//! - `errors`: configuration errors

pub mod database;
pub mod dns;
pub mod errors;
pub mod logging;
pub mod monitor;
pub mod root;

pub use database::DatabaseConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use monitor::MonitorConfig;
pub use root::{CliOverrides, Config};
