use async_trait::async_trait;
use blmonitor_domain::{DomainError, ScanState};

/// Scan cursor persistence. Cursor advances happen inside the recorder's
/// transaction; this port only reads and resets.
#[async_trait]
pub trait ScanStateRepository: Send + Sync {
    async fn get(&self, list_id: &str) -> Result<Option<ScanState>, DomainError>;

    /// Clears the cursor once a pass has visited the whole universe.
    async fn clear_cursor(&self, list_id: &str) -> Result<(), DomainError>;
}
