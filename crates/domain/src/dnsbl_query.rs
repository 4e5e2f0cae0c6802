use crate::blocklist::normalize_stem;
use std::fmt::Write;
use std::net::IpAddr;
use std::sync::Arc;

/// A DNSBL lookup: the probed address and the synthesized query name.
#[derive(Debug, Clone)]
pub struct DnsblQuery {
    pub ip: IpAddr,
    pub name: Arc<str>,
}

impl DnsblQuery {
    /// Builds the query name for `ip` under `stem`.
    ///
    /// IPv4 uses reversed dotted octets (`1.2.3.4` + `sbl.example` gives
    /// `4.3.2.1.sbl.example.`); IPv6 uses reversed nibbles.
    pub fn new(ip: IpAddr, stem: &str) -> Self {
        let mut name = reversed_label(ip);
        name.push_str(&normalize_stem(stem));
        Self {
            ip,
            name: Arc::from(name.as_str()),
        }
    }
}

fn reversed_label(ip: IpAddr) -> String {
    match ip {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{d}.{c}.{b}.{a}")
        }
        IpAddr::V6(v6) => {
            let mut label = String::with_capacity(63);
            for byte in v6.octets().iter().rev() {
                if !label.is_empty() {
                    label.push('.');
                }
                let _ = write!(label, "{:x}.{:x}", byte & 0x0f, byte >> 4);
            }
            label
        }
    }
}
