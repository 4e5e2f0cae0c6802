use blmonitor_application::ports::{
    BlocklistRepository, IpRepository, ListingStore, ResultRepository, ScanStateRepository,
};
use blmonitor_infrastructure::repositories::{
    PgBlocklistRepository, PgIpRepository, PgListingStore, PgResultRepository,
    PgScanStateRepository,
};
use sqlx::PgPool;
use std::sync::Arc;

pub struct Repositories {
    pub blocklist: Arc<dyn BlocklistRepository>,
    pub ips: Arc<dyn IpRepository>,
    pub scan_state: Arc<dyn ScanStateRepository>,
    pub results: Arc<dyn ResultRepository>,
    pub listing_store: Arc<dyn ListingStore>,
}

impl Repositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            blocklist: Arc::new(PgBlocklistRepository::new(pool.clone())),
            ips: Arc::new(PgIpRepository::new(pool.clone())),
            scan_state: Arc::new(PgScanStateRepository::new(pool.clone())),
            results: Arc::new(PgResultRepository::new(pool.clone())),
            listing_store: Arc::new(PgListingStore::new(pool)),
        }
    }
}
