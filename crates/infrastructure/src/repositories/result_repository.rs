use async_trait::async_trait;
use blmonitor_application::ports::ResultRepository;
use blmonitor_domain::DomainError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, instrument};

pub struct PgResultRepository {
    pool: PgPool,
}

impl PgResultRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResultRepository for PgResultRepository {
    #[instrument(skip(self))]
    async fn latest_stamp(&self) -> Result<Option<DateTime<Utc>>, DomainError> {
        let (stamp,) =
            sqlx::query_as::<_, (Option<DateTime<Utc>>,)>("SELECT max(stamp) FROM results")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to read latest result stamp");
                    DomainError::DatabaseError(e.to_string())
                })?;

        Ok(stamp)
    }
}
