use async_trait::async_trait;
use blmonitor_domain::DomainError;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Timestamp of the newest history row, if any.
    async fn latest_stamp(&self) -> Result<Option<DateTime<Utc>>, DomainError>;
}
