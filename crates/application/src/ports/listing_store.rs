use async_trait::async_trait;
use blmonitor_domain::{DomainError, ListingResult};
use std::net::IpAddr;
use std::sync::Arc;

/// Opens atomic units of work for recording check results.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn ListingTransaction>, DomainError>;
}

/// One open transaction. Dropping it without [`commit`](Self::commit) rolls
/// every write back.
#[async_trait]
pub trait ListingTransaction: Send {
    /// Sets the list's cursor to `ip`, creating the state row if needed.
    async fn upsert_cursor(&mut self, list_id: &str, ip: IpAddr) -> Result<(), DomainError>;

    /// `listed` flag of the newest history row for (ip, list).
    async fn latest_listed(&mut self, ip: IpAddr, list_id: &str)
        -> Result<Option<bool>, DomainError>;

    /// Distinct customers whose ranges contain `ip`.
    async fn customers_covering(&mut self, ip: IpAddr) -> Result<Vec<Arc<str>>, DomainError>;

    async fn insert_result(&mut self, result: &ListingResult) -> Result<(), DomainError>;

    async fn commit(self: Box<Self>) -> Result<(), DomainError>;
}
