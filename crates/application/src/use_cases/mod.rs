mod check_listing;
mod record_change;
mod verify_blocklist;

pub use check_listing::{CheckError, CheckListingUseCase, CheckOutcome};
pub use record_change::RecordChangeUseCase;
pub use verify_blocklist::VerifyBlocklistUseCase;
