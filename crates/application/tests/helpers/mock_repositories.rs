#![allow(dead_code)]

use async_trait::async_trait;
use blmonitor_application::ports::{BlocklistProbe, ListingStore, ListingTransaction, ProbeResult};
use blmonitor_domain::{customers_covering, CustomerRange, DomainError, ListingResult};
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock BlocklistProbe
// ============================================================================

pub struct MockBlocklistProbe {
    responses: Arc<RwLock<HashMap<(IpAddr, String), ProbeResult>>>,
    failures: Arc<RwLock<HashMap<(IpAddr, String), String>>>,
    call_count: Arc<AtomicU64>,
}

impl MockBlocklistProbe {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(RwLock::new(HashMap::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            call_count: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn set_response(&self, ip: &str, stem: &str, result: ProbeResult) {
        self.responses
            .write()
            .await
            .insert((ip.parse().unwrap(), stem.to_string()), result);
    }

    pub async fn set_listed(&self, ip: &str, stem: &str, reason: &str) {
        self.set_response(ip, stem, ProbeResult::listed(reason)).await;
    }

    pub async fn set_failure(&self, ip: &str, stem: &str, message: &str) {
        self.failures
            .write()
            .await
            .insert((ip.parse().unwrap(), stem.to_string()), message.to_string());
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl BlocklistProbe for MockBlocklistProbe {
    async fn check(&self, ip: IpAddr, stem: &str) -> Result<ProbeResult, DomainError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        let key = (ip, stem.to_string());
        if let Some(message) = self.failures.read().await.get(&key) {
            return Err(DomainError::TransportError(message.clone()));
        }
        Ok(self
            .responses
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_else(ProbeResult::not_listed))
    }
}

// ============================================================================
// In-memory ListingStore
// ============================================================================

#[derive(Default)]
struct StoreState {
    cursors: HashMap<String, IpAddr>,
    results: Vec<ListingResult>,
    ranges: Vec<CustomerRange>,
}

#[derive(Clone)]
pub struct MemoryListingStore {
    state: Arc<RwLock<StoreState>>,
    fail_on_insert: Arc<RwLock<Option<usize>>>,
    commits: Arc<AtomicU64>,
}

impl MemoryListingStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            fail_on_insert: Arc::new(RwLock::new(None)),
            commits: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn with_ranges(ranges: Vec<(&str, &str)>) -> Self {
        let store = Self::new();
        for (customer, cidr) in ranges {
            store.add_range(customer, cidr).await;
        }
        store
    }

    pub async fn add_range(&self, customer: &str, cidr: &str) {
        self.state
            .write()
            .await
            .ranges
            .push(CustomerRange::parse(customer, cidr).unwrap());
    }

    /// Makes the n-th insert (1-based) of every transaction fail.
    pub async fn fail_on_insert(&self, n: Option<usize>) {
        *self.fail_on_insert.write().await = n;
    }

    pub async fn seed_result(&self, ip: &str, list: &str, listed: bool) {
        self.state.write().await.results.push(ListingResult {
            ip: ip.parse().unwrap(),
            customer: Arc::from("seed"),
            list_id: Arc::from(list),
            reason: Arc::from(""),
            listed,
            stamp: None,
        });
    }

    pub async fn results(&self) -> Vec<ListingResult> {
        self.state.read().await.results.clone()
    }

    pub async fn results_for(&self, ip: &str, list: &str) -> Vec<ListingResult> {
        let ip: IpAddr = ip.parse().unwrap();
        self.results()
            .await
            .into_iter()
            .filter(|r| r.ip == ip && &*r.list_id == list)
            .collect()
    }

    pub async fn cursor(&self, list: &str) -> Option<IpAddr> {
        self.state.read().await.cursors.get(list).copied()
    }

    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ListingStore for MemoryListingStore {
    async fn begin(&self) -> Result<Box<dyn ListingTransaction>, DomainError> {
        Ok(Box::new(MemoryTransaction {
            store: self.clone(),
            cursor: None,
            inserted: Vec::new(),
        }))
    }
}

struct MemoryTransaction {
    store: MemoryListingStore,
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
        if *self.store.fail_on_insert.read().await == Some(self.inserted.len() + 1) {
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
