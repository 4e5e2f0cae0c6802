use blmonitor_application::ports::{BlocklistRepository, IpRepository, ScanStateRepository};
use blmonitor_application::use_cases::{CheckError, CheckListingUseCase, VerifyBlocklistUseCase};
use blmonitor_domain::{pending_ips, BlockList, DomainError};
use chrono::Utc;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Periodic, resumable scan of the whole IP universe against one list.
///
/// Each pass reloads the list, runs its self-test, then checks every address
/// after the stored cursor in ascending order. The cursor moves forward with
/// each committed result and is cleared when the pass ends.
pub struct ListScanJob {
    list_id: Arc<str>,
    lists: Arc<dyn BlocklistRepository>,
    states: Arc<dyn ScanStateRepository>,
    ips: Arc<dyn IpRepository>,
    verify: Arc<VerifyBlocklistUseCase>,
    check: Arc<CheckListingUseCase>,
    shutdown: CancellationToken,
}

impl ListScanJob {
    pub fn new(
        list_id: impl Into<Arc<str>>,
        lists: Arc<dyn BlocklistRepository>,
        states: Arc<dyn ScanStateRepository>,
        ips: Arc<dyn IpRepository>,
        verify: Arc<VerifyBlocklistUseCase>,
        check: Arc<CheckListingUseCase>,
    ) -> Self {
        Self {
            list_id: list_id.into(),
            lists,
            states,
            ips,
            verify,
            check,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn list_id(&self) -> Arc<str> {
        Arc::clone(&self.list_id)
    }

    /// Runs until cancelled (`Ok`) or until a fatal error for this list.
    pub async fn run(&self) -> Result<(), DomainError> {
        match self.scan_forever().await {
            Err(DomainError::Cancelled) => {
                info!(list = %self.list_id, "ListScanJob: shutting down");
                Ok(())
            }
            other => other,
        }
    }

    async fn scan_forever(&self) -> Result<(), DomainError> {
        let mut cursor = self
            .states
            .get(&self.list_id)
            .await?
            .and_then(|state| state.cursor);

        if let Some(ip) = cursor {
            info!(list = %self.list_id, cursor = %ip, "Resuming interrupted pass");
        }

        loop {
            let pass_start = Instant::now();

            let list = self
                .lists
                .get_by_id(&self.list_id)
                .await?
                .ok_or_else(|| DomainError::ListNotFound(self.list_id.to_string()))?;

            info!(list = %list.id, "Starting scan");

            self.verify.execute(&list).await?;

            let checked = self.scan_pass(&list, cursor.take()).await?;

            self.states.clear_cursor(&list.id).await?;

            let wait = list.remaining_period(pass_start.elapsed());
            let next_pass = Utc::now() + chrono::Duration::from_std(wait).unwrap_or_default();
            info!(
                list = %list.id,
                checked,
                elapsed_secs = pass_start.elapsed().as_secs(),
                next_pass = %next_pass.format("%Y-%m-%d %H:%M:%S"),
                "Finished scan"
            );

            self.pause(wait).await?;
        }
    }

    /// One pass over the universe after `cursor`. Returns how many addresses
    /// were checked and recorded.
    async fn scan_pass(&self, list: &BlockList, cursor: Option<IpAddr>) -> Result<usize, DomainError> {
        let pending = pending_ips(self.ips.get_all().await?, cursor);
        debug!(list = %list.id, pending = pending.len(), "IP snapshot taken");

        let mut checked = 0;
        for ip in pending {
            if self.shutdown.is_cancelled() {
                return Err(DomainError::Cancelled);
            }

            match self.check.execute(list, ip).await {
                Ok(_) => checked += 1,
                Err(e) if e.is_cancelled() => return Err(DomainError::Cancelled),
                Err(CheckError::Probe(e)) => {
                    warn!(
                        list = %list.id,
                        ip = %ip,
                        error = %e,
                        "Error querying blocklist, skipping until next pass"
                    );
                    continue;
                }
                Err(CheckError::Record(e)) => return Err(e),
            }

            self.pause(list.throttle()).await?;
        }

        Ok(checked)
    }

    async fn pause(&self, duration: Duration) -> Result<(), DomainError> {
        tokio::select! {
            _ = self.shutdown.cancelled() => Err(DomainError::Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }
}
