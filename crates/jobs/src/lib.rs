pub mod list_scan;
pub mod new_ip_listener;
pub mod runner;

pub use list_scan::ListScanJob;
pub use new_ip_listener::NewIpListenerJob;
pub use runner::JobRunner;
