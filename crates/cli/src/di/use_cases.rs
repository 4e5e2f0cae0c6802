use super::Repositories;
use blmonitor_application::ports::BlocklistProbe;
use blmonitor_application::use_cases::{
    CheckListingUseCase, RecordChangeUseCase, VerifyBlocklistUseCase,
};
use std::sync::Arc;

pub struct UseCases {
    pub verify_blocklist: Arc<VerifyBlocklistUseCase>,
    pub check_listing: Arc<CheckListingUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories, probe: Arc<dyn BlocklistProbe>) -> Self {
        let recorder = Arc::new(RecordChangeUseCase::new(repos.listing_store.clone()));

        Self {
            verify_blocklist: Arc::new(VerifyBlocklistUseCase::new(probe.clone())),
            check_listing: Arc::new(CheckListingUseCase::new(probe, recorder)),
        }
    }
}
