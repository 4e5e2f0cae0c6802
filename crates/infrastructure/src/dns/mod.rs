pub mod dnsbl_probe;
pub mod forwarding;
pub mod transport;

pub use dnsbl_probe::DnsblProbe;
