use blmonitor_domain::{BlockList, DomainError, RecordOutcome};
use std::net::IpAddr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::RecordChangeUseCase;
use crate::ports::{BlocklistProbe, ProbeResult};

#[derive(Error, Debug)]
pub enum CheckError {
    #[error("DNS probe failed: {0}")]
    Probe(DomainError),

    #[error("recording result failed: {0}")]
    Record(DomainError),
}

impl CheckError {
    pub fn is_cancelled(&self) -> bool {
        match self {
            CheckError::Probe(e) | CheckError::Record(e) => e.is_cancelled(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub probe: ProbeResult,
    pub record: RecordOutcome,
}

/// Probes one address against one list and records the result.
pub struct CheckListingUseCase {
    probe: Arc<dyn BlocklistProbe>,
    recorder: Arc<RecordChangeUseCase>,
}

impl CheckListingUseCase {
    pub fn new(probe: Arc<dyn BlocklistProbe>, recorder: Arc<RecordChangeUseCase>) -> Self {
        Self { probe, recorder }
    }

    pub async fn execute(&self, list: &BlockList, ip: IpAddr) -> Result<CheckOutcome, CheckError> {
        let probe = self
            .probe
            .check(ip, &list.stem)
            .await
            .map_err(CheckError::Probe)?;

        if let Some(txt_error) = &probe.txt_error {
            warn!(
                list = %list.id,
                ip = %ip,
                error = %txt_error,
                "TXT lookup failed for listed address, recording without reason"
            );
        }

        info!(
            list = %list.id,
            ip = %ip,
            listed = probe.listed,
            reason = %probe.reason,
            "Checked"
        );

        let record = self
            .recorder
            .execute(&list.id, ip, probe.listed, &probe.reason)
            .await
            .map_err(CheckError::Record)?;

        Ok(CheckOutcome { probe, record })
    }
}
