use async_trait::async_trait;
use blmonitor_domain::DomainError;
use std::net::IpAddr;

/// The monitored IP universe, maintained outside the monitor.
#[async_trait]
pub trait IpRepository: Send + Sync {
    /// Full snapshot, unordered.
    async fn get_all(&self) -> Result<Vec<IpAddr>, DomainError>;
}
