use async_trait::async_trait;
use blmonitor_application::ports::ScanStateRepository;
use blmonitor_domain::{DomainError, ScanState};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{error, instrument, warn};

pub struct PgScanStateRepository {
    pool: PgPool,
}

impl PgScanStateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScanStateRepository for PgScanStateRepository {
    #[instrument(skip(self))]
    async fn get(&self, list_id: &str) -> Result<Option<ScanState>, DomainError> {
        let row = sqlx::query_as::<_, (Option<String>, Option<DateTime<Utc>>)>(
            "SELECT host(lastip), stamp FROM state WHERE id = $1",
        )
        .bind(list_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query scan state");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|(lastip, stamp)| {
            let cursor = lastip.and_then(|raw| match raw.parse() {
                Ok(ip) => Some(ip),
                Err(_) => {
                    warn!(cursor = %raw, "Ignoring unparsable scan cursor");
                    None
                }
            });
            ScanState {
                list_id: Arc::from(list_id),
                cursor,
                stamp,
            }
        }))
    }

    #[instrument(skip(self))]
    async fn clear_cursor(&self, list_id: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE state SET lastip = NULL, stamp = current_timestamp WHERE id = $1")
            .bind(list_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to clear scan cursor");
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }
}
