use blmonitor_domain::config::DatabaseConfig;
use blmonitor_infrastructure::database::create_pool;
use sqlx::PgPool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<PgPool> {
    info!(max_connections = cfg.max_connections, "Connecting to database");

    let pool = create_pool(cfg).await.map_err(|e| {
        error!("Failed to connect to database: {}", e);
        anyhow::anyhow!(e)
    })?;

    info!("Database connection pool ready");
    Ok(pool)
}
