use async_trait::async_trait;
use blmonitor_domain::{BlockList, DomainError};

/// Read access to configured blocklists.
#[async_trait]
pub trait BlocklistRepository: Send + Sync {
    /// All lists ordered by id.
    async fn get_all(&self) -> Result<Vec<BlockList>, DomainError>;

    async fn get_by_id(&self, id: &str) -> Result<Option<BlockList>, DomainError>;
}
