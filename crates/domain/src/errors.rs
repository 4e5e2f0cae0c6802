use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("DNS query to {server} timed out")]
    QueryTimeout { server: String },

    #[error("DNS transport error: {0}")]
    TransportError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Blocklist not found: {0}")]
    ListNotFound(String),

    #[error("Self-test failed for list {list}: {reason}")]
    SelfTestFailed { list: String, reason: String },

    #[error("Change feed subscription lost: {0}")]
    SubscriptionLost(String),

    #[error("Operation cancelled")]
    Cancelled,
}

impl DomainError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DomainError::Cancelled)
    }
}
