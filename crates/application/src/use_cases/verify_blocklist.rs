use blmonitor_domain::{BlockList, DomainError};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::ports::BlocklistProbe;

/// Self-test run before trusting a list's answers for a pass.
///
/// The positive address must be listed and the negative one must not be.
/// Unset addresses skip their check.
pub struct VerifyBlocklistUseCase {
    probe: Arc<dyn BlocklistProbe>,
}

impl VerifyBlocklistUseCase {
    pub fn new(probe: Arc<dyn BlocklistProbe>) -> Self {
        Self { probe }
    }

    #[instrument(skip(self, list), fields(list = %list.id))]
    pub async fn execute(&self, list: &BlockList) -> Result<(), DomainError> {
        if let Some(ip) = list.test_positive {
            let listed = self.query(list, ip, "positive").await?;
            if !listed {
                return Err(self_test_failed(
                    list,
                    format!("positive test address {} is not listed", ip),
                ));
            }
            debug!(ip = %ip, "Positive self-test passed");
        }

        if let Some(ip) = list.test_negative {
            let listed = self.query(list, ip, "negative").await?;
            if listed {
                return Err(self_test_failed(
                    list,
                    format!("negative test address {} is listed", ip),
                ));
            }
            debug!(ip = %ip, "Negative self-test passed");
        }

        Ok(())
    }

    async fn query(&self, list: &BlockList, ip: IpAddr, kind: &str) -> Result<bool, DomainError> {
        match self.probe.check(ip, &list.stem).await {
            Ok(result) => Ok(result.listed),
            Err(DomainError::Cancelled) => Err(DomainError::Cancelled),
            Err(e) => Err(self_test_failed(
                list,
                format!("{} test query for {} failed: {}", kind, ip, e),
            )),
        }
    }
}

fn self_test_failed(list: &BlockList, reason: String) -> DomainError {
    DomainError::SelfTestFailed {
        list: list.id.to_string(),
        reason,
    }
}
