use async_trait::async_trait;
use blmonitor_application::ports::{ListingStore, ListingTransaction};
use blmonitor_domain::{DomainError, ListingResult};
use sqlx::{PgPool, Postgres, Transaction};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::error;

/// PostgreSQL-backed recorder store. Each unit of work is one transaction;
/// dropping it uncommitted rolls back.
pub struct PgListingStore {
    pool: PgPool,
}

impl PgListingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingStore for PgListingStore {
    async fn begin(&self) -> Result<Box<dyn ListingTransaction>, DomainError> {
        let tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Failed to begin transaction");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(Box::new(PgListingTransaction { tx }))
    }
}

pub struct PgListingTransaction {
    tx: Transaction<'static, Postgres>,
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!(error = %e, "{}", context);
    DomainError::DatabaseError(format!("{}: {}", context, e))
}

#[async_trait]
impl ListingTransaction for PgListingTransaction {
    async fn upsert_cursor(&mut self, list_id: &str, ip: IpAddr) -> Result<(), DomainError> {
        // Update first, insert on miss: `state.id` need not carry a unique
        // constraint for this to keep one row per list.
        let updated = sqlx::query(
            "UPDATE state SET lastip = $2::inet, stamp = current_timestamp WHERE id = $1",
        )
        .bind(list_id)
        .bind(ip.to_string())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| db_error("while updating state", e))?;

        if updated.rows_affected() == 0 {
            sqlx::query(
                "INSERT INTO state (id, lastip, stamp) VALUES ($1, $2::inet, current_timestamp)",
            )
            .bind(list_id)
            .bind(ip.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| db_error("while inserting state", e))?;
        }

        Ok(())
    }

    async fn latest_listed(
        &mut self,
        ip: IpAddr,
        list_id: &str,
    ) -> Result<Option<bool>, DomainError> {
        let row = sqlx::query_as::<_, (bool,)>(
            "SELECT listed FROM results
             WHERE ip = $1::inet AND list = $2
             ORDER BY stamp DESC
             LIMIT 1",
        )
        .bind(ip.to_string())
        .bind(list_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| db_error("while getting previous listing state", e))?;

        Ok(row.map(|(listed,)| listed))
    }

    async fn customers_covering(&mut self, ip: IpAddr) -> Result<Vec<Arc<str>>, DomainError> {
        let rows = sqlx::query_as::<_, (String,)>(
            "SELECT DISTINCT customer FROM customer_ips
             WHERE $1::inet <<= ip
             ORDER BY customer",
        )
        .bind(ip.to_string())
        .fetch_all(&mut *self.tx)
        .await
        .map_err(|e| db_error("while getting customers for IP", e))?;

        Ok(rows
            .into_iter()
            .map(|(customer,)| Arc::from(customer.as_str()))
            .collect())
    }

    async fn insert_result(&mut self, result: &ListingResult) -> Result<(), DomainError> {
        sqlx::query(
            "INSERT INTO results (ip, customer, list, txt, listed)
             VALUES ($1::inet, $2, $3, $4, $5)",
        )
        .bind(result.ip.to_string())
        .bind(&*result.customer)
        .bind(&*result.list_id)
        .bind(&*result.reason)
        .bind(result.listed)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| db_error("while updating listing state", e))?;

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), DomainError> {
        let this = *self;
        this.tx
            .commit()
            .await
            .map_err(|e| db_error("while committing result", e))
    }
}
