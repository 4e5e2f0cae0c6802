use async_trait::async_trait;
use blmonitor_application::ports::IpRepository;
use blmonitor_domain::DomainError;
use sqlx::PgPool;
use std::net::IpAddr;
use tracing::{error, instrument, warn};

pub struct PgIpRepository {
    pool: PgPool,
}

impl PgIpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IpRepository for PgIpRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<IpAddr>, DomainError> {
        let rows = sqlx::query_as::<_, (String,)>("SELECT host(ip) FROM ips")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to read monitored IPs");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(rows
            .into_iter()
            .filter_map(|(raw,)| match raw.parse() {
                Ok(ip) => Some(ip),
                Err(_) => {
                    warn!(ip = %raw, "Skipping unparsable monitored IP");
                    None
                }
            })
            .collect())
    }
}
