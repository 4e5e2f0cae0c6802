use blmonitor_domain::{
    fanout_customers, is_state_change, DomainError, ListingResult, RecordOutcome,
};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::ListingStore;

/// Records one check result: advances the list cursor and, when the listing
/// state flipped, appends one history row per affected customer.
///
/// All writes share one transaction. Two concurrent callers for the same
/// (ip, list) may both see the same prior row and both append; the store's
/// transaction isolation is the only guard.
pub struct RecordChangeUseCase {
    store: Arc<dyn ListingStore>,
}

impl RecordChangeUseCase {
    pub fn new(store: Arc<dyn ListingStore>) -> Self {
        Self { store }
    }

    #[instrument(skip_all, fields(list = %list_id, ip = %ip, listed = listed))]
    pub async fn execute(
        &self,
        list_id: &Arc<str>,
        ip: IpAddr,
        listed: bool,
        reason: &str,
    ) -> Result<RecordOutcome, DomainError> {
        let mut tx = self.store.begin().await?;

        tx.upsert_cursor(list_id, ip).await?;

        let prior = tx.latest_listed(ip, list_id).await?;
        if !is_state_change(prior, listed) {
            tx.commit().await?;
            return Ok(RecordOutcome::unchanged());
        }

        let customers = fanout_customers(tx.customers_covering(ip).await?);
        let reason: Arc<str> = Arc::from(reason);
        for customer in &customers {
            let row = ListingResult {
                ip,
                customer: Arc::clone(customer),
                list_id: Arc::clone(list_id),
                reason: Arc::clone(&reason),
                listed,
                stamp: None,
            };
            tx.insert_result(&row).await?;
        }

        tx.commit().await?;

        debug!(
            prior = ?prior,
            listed,
            customers = customers.len(),
            "Listing state change recorded"
        );

        Ok(RecordOutcome::changed(customers.len()))
    }
}
