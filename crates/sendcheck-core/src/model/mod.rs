// ── Domain model ──

pub mod record;
pub mod verdict;

pub use record::{RecordKind, RecordRequest};
pub use sendcheck_api::QueryKind;
pub use verdict::{FailureKind, Verdict, VerificationStatus};
