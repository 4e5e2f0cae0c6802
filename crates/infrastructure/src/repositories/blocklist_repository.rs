use async_trait::async_trait;
use blmonitor_application::ports::BlocklistRepository;
use blmonitor_domain::{BlockList, DomainError};
use sqlx::PgPool;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{error, instrument};

type ListRow = (
    String,
    Option<String>,
    String,
    Option<String>,
    Option<String>,
    i32,
    i32,
);

pub struct PgBlocklistRepository {
    pool: PgPool,
}

impl PgBlocklistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_list(row: ListRow) -> Result<BlockList, DomainError> {
        let (id, list_type, stem, testpos, testneg, throttle, period) = row;

        let test_positive = parse_test_address(&id, "testpos", testpos)?;
        let test_negative = parse_test_address(&id, "testneg", testneg)?;

        let mut list = BlockList::new(id, &stem)
            .with_self_tests(test_positive, test_negative)
            .with_timing(throttle.max(0) as u64, period.max(0) as u64);
        list.list_type = list_type.map(|t| Arc::from(t.as_str()));
        Ok(list)
    }

    /// Rows that fail to parse are logged and left out, so one bad list
    /// does not stop the others from being monitored.
    fn collect_lists(rows: Vec<ListRow>) -> Vec<BlockList> {
        rows.into_iter()
            .filter_map(|row| {
                let id = row.0.clone();
                match Self::row_to_list(row) {
                    Ok(list) => Some(list),
                    Err(e) => {
                        error!(list = %id, error = %e, "Skipping list with invalid configuration");
                        None
                    }
                }
            })
            .collect()
    }
}

/// Empty or NULL test addresses mean "no self-test".
fn parse_test_address(
    list_id: &str,
    column: &str,
    value: Option<String>,
) -> Result<Option<IpAddr>, DomainError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            DomainError::InvalidIpAddress(format!("list {} {}: '{}'", list_id, column, raw))
        }),
    }
}

#[async_trait]
impl BlocklistRepository for PgBlocklistRepository {
    #[instrument(skip(self))]
    async fn get_all(&self) -> Result<Vec<BlockList>, DomainError> {
        let rows = sqlx::query_as::<_, ListRow>(
            "SELECT id, type, stem, testpos, testneg, throttle, period
             FROM lists
             ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query lists");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(Self::collect_lists(rows))
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: &str) -> Result<Option<BlockList>, DomainError> {
        let row = sqlx::query_as::<_, ListRow>(
            "SELECT id, type, stem, testpos, testneg, throttle, period
             FROM lists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query list by id");
            DomainError::DatabaseError(e.to_string())
        })?;

        row.map(Self::row_to_list).transpose()
    }
}
