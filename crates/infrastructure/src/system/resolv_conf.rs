use blmonitor_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use tokio::fs;
use tracing::debug;

const DNS_PORT: u16 = 53;

/// First usable `nameserver` entry of a resolv.conf file.
fn parse_nameserver(content: &str) -> Option<IpAddr> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some("nameserver"), Some(addr)) => {
                    // Drop IPv6 zone suffix (fe80::1%eth0)
                    let addr = addr.split('%').next().unwrap_or(addr);
                    addr.parse().ok()
                }
                _ => None,
            }
        })
        .next()
}

/// Finds the system resolver when none is configured.
pub struct ResolvConfReader {
    path: String,
}

impl ResolvConfReader {
    pub fn new() -> Self {
        Self {
            path: "/etc/resolv.conf".to_string(),
        }
    }

    /// Create a reader for a custom file path (useful for testing)
    pub fn with_path(path: String) -> Self {
        Self { path }
    }

    pub async fn default_nameserver(&self) -> Result<SocketAddr, DomainError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::IoError(format!("Failed to read {}: {}", self.path, e))
        })?;

        let ip = parse_nameserver(&content).ok_or_else(|| {
            DomainError::IoError(format!("No nameserver entry in {}", self.path))
        })?;

        debug!(nameserver = %ip, path = %self.path, "Using system resolver");
        Ok(SocketAddr::new(ip, DNS_PORT))
    }
}

impl Default for ResolvConfReader {
    fn default() -> Self {
        Self::new()
    }
}
