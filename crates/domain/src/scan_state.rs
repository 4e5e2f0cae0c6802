use chrono::{DateTime, Utc};
use std::net::IpAddr;
use std::sync::Arc;

/// Persisted scan progress for one list.
#[derive(Debug, Clone)]
pub struct ScanState {
    pub list_id: Arc<str>,
    /// Last IP whose check was committed in the current pass.
    pub cursor: Option<IpAddr>,
    pub stamp: Option<DateTime<Utc>>,
}

impl ScanState {
    pub fn empty(list_id: impl Into<Arc<str>>) -> Self {
        Self {
            list_id: list_id.into(),
            cursor: None,
            stamp: None,
        }
    }
}

/// Sort key for the monitored universe: canonical textual form.
///
/// Scan order and cursor comparison both use this key so a resumed pass
/// never revisits an address at or before the cursor.
pub fn scan_key(ip: &IpAddr) -> String {
    ip.to_string()
}

/// Orders a snapshot of the IP universe and drops everything at or before
/// `cursor`.
pub fn pending_ips(mut universe: Vec<IpAddr>, cursor: Option<IpAddr>) -> Vec<IpAddr> {
    universe.sort_by_cached_key(scan_key);
    universe.dedup();
    match cursor {
        Some(cursor) => {
            let watermark = scan_key(&cursor);
            universe
                .into_iter()
                .filter(|ip| scan_key(ip) > watermark)
                .collect()
        }
        None => universe,
    }
}
