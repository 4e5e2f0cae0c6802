use serde::{Deserialize, Serialize};

/// Resolver used for DNSBL probes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Resolver as "host:port" (default: first nameserver of /etc/resolv.conf)
    #[serde(default)]
    pub server: Option<String>,

    /// Per-exchange timeout in milliseconds (default: 5000)
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            server: None,
            query_timeout: default_query_timeout(),
        }
    }
}

fn default_query_timeout() -> u64 {
    5000
}
