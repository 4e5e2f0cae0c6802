use crate::{ListScanJob, NewIpListenerJob};
use blmonitor_domain::DomainError;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

enum JobKind {
    Scanner(Arc<str>),
    Listener,
}

/// Owns every long-running task of the monitor.
///
/// A scanner that fails only stops monitoring its own list. A listener
/// failure cancels everything and is returned to the caller.
pub struct JobRunner {
    scanners: Vec<ListScanJob>,
    listener: Option<NewIpListenerJob>,
    shutdown: CancellationToken,
}

impl JobRunner {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self {
            scanners: Vec::new(),
            listener: None,
            shutdown,
        }
    }

    pub fn with_list_scanner(mut self, job: ListScanJob) -> Self {
        self.scanners.push(job.with_cancellation(self.shutdown.clone()));
        self
    }

    pub fn with_listener(mut self, job: NewIpListenerJob) -> Self {
        self.listener = Some(job.with_cancellation(self.shutdown.clone()));
        self
    }

    /// Waits for every job to finish.
    pub async fn run(self) -> Result<(), DomainError> {
        let mut tasks = JoinSet::new();

        info!(lists = self.scanners.len(), "Starting background jobs");

        for job in self.scanners {
            let list = job.list_id();
            tasks.spawn(async move { (JobKind::Scanner(list), job.run().await) });
        }

        if let Some(listener) = self.listener {
            tasks.spawn(async move { (JobKind::Listener, listener.run().await) });
        }

        let mut fatal = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((JobKind::Scanner(list), Ok(()))) => info!(list = %list, "Scanner stopped"),
                Ok((JobKind::Scanner(list), Err(e))) => {
                    error!(list = %list, error = %e, "Monitoring of list stopped");
                }
                Ok((JobKind::Listener, Ok(()))) => info!("Listener stopped"),
                Ok((JobKind::Listener, Err(e))) => {
                    error!(error = %e, "New IP listener failed, shutting down");
                    self.shutdown.cancel();
                    if fatal.is_none() {
                        fatal = Some(e);
                    }
                }
                Err(e) => error!(error = %e, "Job task panicked"),
            }
        }

        match fatal {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
