use async_trait::async_trait;
use blmonitor_domain::DomainError;

/// Push subscription delivering newly observed IP payloads.
#[async_trait]
pub trait IpEventSource: Send {
    /// Waits for the next raw payload. Payloads are not validated here.
    ///
    /// An error means the subscription is gone and cannot be resumed.
    async fn recv(&mut self) -> Result<String, DomainError>;
}
