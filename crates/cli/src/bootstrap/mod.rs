pub mod config;
pub mod database;
pub mod logging;
pub mod resolver;
pub mod signal;

pub use config::load_config;
pub use database::init_database;
pub use logging::init_logging;
pub use resolver::resolve_dns_server;
pub use signal::spawn_signal_handler;
