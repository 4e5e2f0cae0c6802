#![allow(dead_code)]

use async_trait::async_trait;
use blmonitor_application::ports::{
    BlocklistProbe, BlocklistRepository, IpEventSource, IpRepository, ListingStore,
    ListingTransaction, ProbeResult, ResultRepository, ScanStateRepository,
};
use blmonitor_domain::{
    customers_covering, BlockList, CustomerRange, DomainError, ListingResult, ScanState,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio_util::sync::CancellationToken;

// ============================================================================
// Mock BlocklistProbe
// ============================================================================

#[derive(Clone)]
enum Scripted {
    Answer(ProbeResult),
    Fail(String),
    Hang,
}

/// Scripted DNSBL probe keyed by `(ip, stem)`. Unscripted pairs are not
/// listed. Every call is recorded in order.
pub struct MockBlocklistProbe {
    script: Arc<RwLock<HashMap<(IpAddr, String), Scripted>>>,
    calls: Arc<RwLock<Vec<(IpAddr, String)>>>,
    call_count: Arc<AtomicU64>,
    shutdown: CancellationToken,
}

impl MockBlocklistProbe {
    pub fn new() -> Self {
        Self {
            script: Arc::new(RwLock::new(HashMap::new())),
            calls: Arc::new(RwLock::new(Vec::new())),
            call_count: Arc::new(AtomicU64::new(0)),
            shutdown: CancellationToken::new(),
        }
    }

    /// Hanging queries end with `Cancelled` once this token fires, like the
    /// real probe.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    async fn set(&self, ip: &str, stem: &str, scripted: Scripted) {
        self.script
            .write()
            .await
            .insert((ip.parse().unwrap(), stem.to_string()), scripted);
    }

    pub async fn set_listed(&self, ip: &str, stem: &str, reason: &str) {
        self.set(ip, stem, Scripted::Answer(ProbeResult::listed(reason)))
            .await;
    }

    pub async fn set_failure(&self, ip: &str, stem: &str, message: &str) {
        self.set(ip, stem, Scripted::Fail(message.to_string())).await;
    }

    /// The probe never answers for this pair.
    pub async fn set_hang(&self, ip: &str, stem: &str) {
        self.set(ip, stem, Scripted::Hang).await;
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub async fn calls(&self) -> Vec<(IpAddr, String)> {
        self.calls.read().await.clone()
    }

    pub async fn calls_for_stem(&self, stem: &str) -> Vec<IpAddr> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|(_, s)| s == stem)
            .map(|(ip, _)| *ip)
            .collect()
    }
}

#[async_trait]
impl BlocklistProbe for MockBlocklistProbe {
    async fn check(&self, ip: IpAddr, stem: &str) -> Result<ProbeResult, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.calls.write().await.push((ip, stem.to_string()));

        let scripted = self
            .script
            .read()
            .await
            .get(&(ip, stem.to_string()))
            .cloned();

        match scripted {
            Some(Scripted::Answer(result)) => Ok(result),
            Some(Scripted::Fail(message)) => Err(DomainError::QueryTimeout { server: message }),
            Some(Scripted::Hang) => {
                tokio::select! {
                    _ = self.shutdown.cancelled() => Err(DomainError::Cancelled),
                    _ = tokio::time::sleep(Duration::from_secs(3600)) => {
                        Err(DomainError::QueryTimeout { server: "mock".to_string() })
                    }
                }
            }
            None => Ok(ProbeResult::not_listed()),
        }
    }
}

// ============================================================================
// In-memory monitor store
// ============================================================================

#[derive(Default)]
struct StoreState {
    lists: Vec<BlockList>,
    ips: Vec<IpAddr>,
    ranges: Vec<CustomerRange>,
    cursors: HashMap<String, IpAddr>,
    results: Vec<ListingResult>,
    cleared: Vec<String>,
    last_stamp: Option<DateTime<Utc>>,
}

/// One in-memory stand-in for every table the monitor touches.
#[derive(Clone)]
pub struct MemoryMonitorStore {
    state: Arc<RwLock<StoreState>>,
    fail_inserts: Arc<RwLock<bool>>,
    fail_lists: Arc<RwLock<bool>>,
    commits: Arc<AtomicU64>,
}

impl MemoryMonitorStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            fail_inserts: Arc::new(RwLock::new(false)),
            fail_lists: Arc::new(RwLock::new(false)),
            commits: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn add_list(&self, list: BlockList) {
        let mut state = self.state.write().await;
        state.lists.push(list);
        state.lists.sort_by(|a, b| a.id.cmp(&b.id));
    }

    pub async fn add_ips(&self, ips: &[&str]) {
        let mut state = self.state.write().await;
        for ip in ips {
            state.ips.push(ip.parse().unwrap());
        }
    }

    pub async fn add_range(&self, customer: &str, cidr: &str) {
        self.state
            .write()
            .await
            .ranges
            .push(CustomerRange::parse(customer, cidr).unwrap());
    }

    pub async fn set_cursor(&self, list: &str, ip: &str) {
        self.state
            .write()
            .await
            .cursors
            .insert(list.to_string(), ip.parse().unwrap());
    }

    pub async fn set_last_stamp(&self, stamp: DateTime<Utc>) {
        self.state.write().await.last_stamp = Some(stamp);
    }

    pub async fn set_fail_inserts(&self, fail: bool) {
        *self.fail_inserts.write().await = fail;
    }

    pub async fn set_fail_lists(&self, fail: bool) {
        *self.fail_lists.write().await = fail;
    }

    pub async fn results(&self) -> Vec<ListingResult> {
        self.state.read().await.results.clone()
    }

    pub async fn results_for_list(&self, list: &str) -> Vec<ListingResult> {
        self.results()
            .await
            .into_iter()
            .filter(|r| &*r.list_id == list)
            .collect()
    }

    pub async fn cursor(&self, list: &str) -> Option<IpAddr> {
        self.state.read().await.cursors.get(list).copied()
    }

    pub async fn cleared_count(&self, list: &str) -> usize {
        self.state
            .read()
            .await
            .cleared
            .iter()
            .filter(|l| l.as_str() == list)
            .count()
    }

    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BlocklistRepository for MemoryMonitorStore {
    async fn get_all(&self) -> Result<Vec<BlockList>, DomainError> {
        if *self.fail_lists.read().await {
            return Err(DomainError::DatabaseError("lists unavailable".to_string()));
        }
        Ok(self.state.read().await.lists.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<BlockList>, DomainError> {
        if *self.fail_lists.read().await {
            return Err(DomainError::DatabaseError("lists unavailable".to_string()));
        }
        Ok(self
            .state
            .read()
            .await
            .lists
            .iter()
            .find(|l| &*l.id == id)
            .cloned())
    }
}

#[async_trait]
impl IpRepository for MemoryMonitorStore {
    async fn get_all(&self) -> Result<Vec<IpAddr>, DomainError> {
        Ok(self.state.read().await.ips.clone())
    }
}

#[async_trait]
impl ScanStateRepository for MemoryMonitorStore {
    async fn get(&self, list_id: &str) -> Result<Option<ScanState>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .cursors
            .get(list_id)
            .map(|ip| ScanState {
                list_id: Arc::from(list_id),
                cursor: Some(*ip),
                stamp: None,
            }))
    }

    async fn clear_cursor(&self, list_id: &str) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state.cursors.remove(list_id);
        state.cleared.push(list_id.to_string());
        Ok(())
    }
}

#[async_trait]
impl ResultRepository for MemoryMonitorStore {
    async fn latest_stamp(&self) -> Result<Option<DateTime<Utc>>, DomainError> {
        Ok(self.state.read().await.last_stamp)
    }
}

#[async_trait]
impl ListingStore for MemoryMonitorStore {
    async fn begin(&self) -> Result<Box<dyn ListingTransaction>, DomainError> {
        Ok(Box::new(MemoryTransaction {
            store: self.clone(),
            cursor: None,
            inserted: Vec::new(),
        }))
    }
}

struct MemoryTransaction {
    store: MemoryMonitorStore,
    cursor: Option<(String, IpAddr)>,
    inserted: Vec<ListingResult>,
}

#[async_trait]
impl ListingTransaction for MemoryTransaction {
    async fn upsert_cursor(&mut self, list_id: &str, ip: IpAddr) -> Result<(), DomainError> {
        self.cursor = Some((list_id.to_string(), ip));
        Ok(())
    }

    async fn latest_listed(
        &mut self,
        ip: IpAddr,
        list_id: &str,
    ) -> Result<Option<bool>, DomainError> {
        Ok(self
            .store
            .state
            .read()
            .await
            .results
            .iter()
            .rev()
            .find(|r| r.ip == ip && &*r.list_id == list_id)
            .map(|r| r.listed))
    }

    async fn customers_covering(&mut self, ip: IpAddr) -> Result<Vec<Arc<str>>, DomainError> {
        Ok(customers_covering(&self.store.state.read().await.ranges, ip))
    }

    async fn insert_result(&mut self, result: &ListingResult) -> Result<(), DomainError> {
        if *self.store.fail_inserts.read().await {
            return Err(DomainError::DatabaseError("insert failed".to_string()));
        }
        self.inserted.push(result.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let MemoryTransaction {
            store,
            cursor,
            inserted,
        } = *self;
        let mut state = store.state.write().await;
        if let Some((list, ip)) = cursor {
            state.cursors.insert(list, ip);
        }
        state.results.extend(inserted);
        store.commits.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

// ============================================================================
// Channel-backed IpEventSource
// ============================================================================

/// Delivers payloads pushed through the paired sender. Dropping the sender
/// behaves like a lost database connection.
pub struct ChannelIpEventSource {
    rx: mpsc::UnboundedReceiver<String>,
}

impl ChannelIpEventSource {
    pub fn new() -> (mpsc::UnboundedSender<String>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }
}

#[async_trait]
impl IpEventSource for ChannelIpEventSource {
    async fn recv(&mut self) -> Result<String, DomainError> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| DomainError::SubscriptionLost("channel closed".to_string()))
    }
}
