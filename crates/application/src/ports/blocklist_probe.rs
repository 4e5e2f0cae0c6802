use async_trait::async_trait;
use blmonitor_domain::DomainError;
use std::net::IpAddr;

/// Outcome of one DNSBL membership check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub listed: bool,
    /// Concatenated TXT fragments; empty when unlisted or unavailable.
    pub reason: String,
    /// TXT lookup failure after a positive A answer. Membership still stands.
    pub txt_error: Option<String>,
}

impl ProbeResult {
    pub fn not_listed() -> Self {
        Self {
            listed: false,
            reason: String::new(),
            txt_error: None,
        }
    }

    pub fn listed(reason: impl Into<String>) -> Self {
        Self {
            listed: true,
            reason: reason.into(),
            txt_error: None,
        }
    }

    pub fn listed_without_reason(txt_error: impl Into<String>) -> Self {
        Self {
            listed: true,
            reason: String::new(),
            txt_error: Some(txt_error.into()),
        }
    }
}

/// Checks whether an address is present on a DNS blocklist.
#[async_trait]
pub trait BlocklistProbe: Send + Sync {
    /// Queries `ip` under the zone `stem` (A, then TXT when listed).
    ///
    /// Returns `DomainError::Cancelled` when shutdown interrupts the exchange.
    async fn check(&self, ip: IpAddr, stem: &str) -> Result<ProbeResult, DomainError>;
}
