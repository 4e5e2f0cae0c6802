use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

/// A DNS-based blocklist as configured in the store.
///
/// Lists are edited outside the monitor; scan jobs reload them at the start of
/// every pass so throttle, period and self-test changes apply on the next cycle.
#[derive(Debug, Clone)]
pub struct BlockList {
    pub id: Arc<str>,
    pub list_type: Option<Arc<str>>,
    pub stem: Arc<str>,
    /// Address the list is known to contain.
    pub test_positive: Option<IpAddr>,
    /// Address the list is known not to contain.
    pub test_negative: Option<IpAddr>,
    pub throttle_secs: u64,
    pub period_secs: u64,
}

impl BlockList {
    pub fn new(id: impl Into<Arc<str>>, stem: &str) -> Self {
        Self {
            id: id.into(),
            list_type: None,
            stem: Arc::from(normalize_stem(stem).as_str()),
            test_positive: None,
            test_negative: None,
            throttle_secs: 0,
            period_secs: 0,
        }
    }

    pub fn with_self_tests(mut self, positive: Option<IpAddr>, negative: Option<IpAddr>) -> Self {
        self.test_positive = positive;
        self.test_negative = negative;
        self
    }

    pub fn with_timing(mut self, throttle_secs: u64, period_secs: u64) -> Self {
        self.throttle_secs = throttle_secs;
        self.period_secs = period_secs;
        self
    }

    pub fn throttle(&self) -> Duration {
        Duration::from_secs(self.throttle_secs)
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }

    /// Time left to wait after a pass that took `elapsed`, floored at zero.
    pub fn remaining_period(&self, elapsed: Duration) -> Duration {
        self.period().saturating_sub(elapsed)
    }
}

/// Normalizes a zone stem so it both starts and ends with a dot.
///
/// `sbl.example` becomes `.sbl.example.`; already-dotted stems are unchanged.
pub fn normalize_stem(stem: &str) -> String {
    let trimmed = stem.trim();
    let mut normalized = String::with_capacity(trimmed.len() + 2);
    if !trimmed.starts_with('.') {
        normalized.push('.');
    }
    normalized.push_str(trimmed);
    if !normalized.ends_with('.') {
        normalized.push('.');
    }
    normalized
}
