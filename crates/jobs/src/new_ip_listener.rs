use blmonitor_application::ports::{BlocklistRepository, IpEventSource, ResultRepository};
use blmonitor_application::use_cases::CheckListingUseCase;
use blmonitor_domain::DomainError;
use std::net::IpAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Checks addresses newly inserted into the monitored universe against every
/// list as soon as their notification arrives.
pub struct NewIpListenerJob {
    source: Box<dyn IpEventSource>,
    results: Arc<dyn ResultRepository>,
    dispatch: Dispatch,
}

struct Dispatch {
    lists: Arc<dyn BlocklistRepository>,
    check: Arc<CheckListingUseCase>,
    shutdown: CancellationToken,
}

impl NewIpListenerJob {
    pub fn new(
        source: Box<dyn IpEventSource>,
        lists: Arc<dyn BlocklistRepository>,
        results: Arc<dyn ResultRepository>,
        check: Arc<CheckListingUseCase>,
    ) -> Self {
        Self {
            source,
            results,
            dispatch: Dispatch {
                lists,
                check,
                shutdown: CancellationToken::new(),
            },
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.dispatch.shutdown = token;
        self
    }

    /// Returns `Ok` on cancellation. Any error means the subscription or the
    /// list table is gone and the process should stop.
    pub async fn run(self) -> Result<(), DomainError> {
        let Self {
            mut source,
            results,
            dispatch,
        } = self;

        let last_change = results.latest_stamp().await?;
        info!(last_change = ?last_change, "Listening for new IPs");

        loop {
            let payload = tokio::select! {
                _ = dispatch.shutdown.cancelled() => {
                    info!("NewIpListenerJob: shutting down");
                    return Ok(());
                }
                payload = source.recv() => payload?,
            };

            dispatch.handle(&payload).await?;
        }
    }
}

impl Dispatch {
    async fn handle(&self, payload: &str) -> Result<(), DomainError> {
        let ip: IpAddr = match payload.trim().parse() {
            Ok(ip) => ip,
            Err(_) => {
                warn!(payload = %payload, "Ignoring notification with unparseable IP");
                return Ok(());
            }
        };

        info!(ip = %ip, "New IP");

        let lists = self.lists.get_all().await?;

        for list in &lists {
            if self.shutdown.is_cancelled() {
                return Ok(());
            }

            match self.check.execute(list, ip).await {
                Ok(outcome) => {
                    debug!(list = %list.id, ip = %ip, changed = outcome.record.changed, "New IP checked")
                }
                Err(e) if e.is_cancelled() => return Ok(()),
                Err(e) => error!(list = %list.id, ip = %ip, error = %e, "Failed to check new IP"),
            }
        }

        Ok(())
    }
}
