pub mod ip_listener;

pub use ip_listener::PgIpEventSource;

use blmonitor_domain::config::DatabaseConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Opens the pool shared by every scan job and the listener.
///
/// The schema is owned by deployment tooling; nothing here migrates it.
pub async fn create_pool(cfg: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&cfg.url)
        .await
}
