use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;

/// Customer recorded when no range covers the address.
pub const UNKNOWN_CUSTOMER: &str = "unknown";

/// One append-only history row.
#[derive(Debug, Clone)]
pub struct ListingResult {
    pub ip: IpAddr,
    pub customer: Arc<str>,
    pub list_id: Arc<str>,
    pub reason: Arc<str>,
    pub listed: bool,
    pub stamp: Option<DateTime<Utc>>,
}

/// A check differs from history when there is no prior row or the flag flipped.
pub fn is_state_change(prior: Option<bool>, listed: bool) -> bool {
    prior != Some(listed)
}

/// Distinct customers to fan a change out to, falling back to
/// [`UNKNOWN_CUSTOMER`] when nobody owns the address.
pub fn fanout_customers(mut customers: Vec<Arc<str>>) -> Vec<Arc<str>> {
    customers.sort();
    customers.dedup();
    if customers.is_empty() {
        customers.push(Arc::from(UNKNOWN_CUSTOMER));
    }
    customers
}

/// What a recorder call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordOutcome {
    pub changed: bool,
    pub rows_written: usize,
}

impl RecordOutcome {
    pub fn unchanged() -> Self {
        Self::default()
    }

    pub fn changed(rows_written: usize) -> Self {
        Self {
            changed: true,
            rows_written,
        }
    }
}
