// ── Verdicts ──
//
// The single outcome of checking one record. Built once by an interpreter
// (or by the verifier on failure) and never mutated; a re-check produces a
// new verdict.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::record::RecordKind;

/// Classification of a record check.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum VerificationStatus {
    /// Record present and satisfies the policy / expected value.
    Valid,
    /// Record missing, or present but violating a mandatory rule.
    Invalid,
    /// Record present but different from what was expected; needs a human.
    Review,
    /// The check itself failed (network, malformed response).
    Error,
}

/// What stopped a check that ended in [`VerificationStatus::Error`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FailureKind {
    /// Transport failure or non-success HTTP status.
    Network,
    /// The resolver request hit the configured timeout.
    Timeout,
    /// The resolver body was not DNS JSON.
    Parse,
    /// An answer could not be read as its record kind.
    MalformedAnswer,
    /// The request named no usable domain.
    InvalidDomain,
}

impl FailureKind {
    /// Failures that happened before any answer was read.
    pub fn is_resolver_failure(self) -> bool {
        matches!(self, Self::Network | Self::Timeout | Self::Parse)
    }
}

/// Result of verifying one `RecordRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub status: VerificationStatus,
    pub matches_expected: bool,
    /// Interpreted actual value; empty when no record was found.
    pub value: String,
    pub message: String,
    /// Set only on `error` verdicts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl Verdict {
    pub fn valid(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Valid,
            matches_expected: true,
            value: value.into(),
            message: message.into(),
            failure: None,
        }
    }

    pub fn review(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Review,
            matches_expected: false,
            value: value.into(),
            message: message.into(),
            failure: None,
        }
    }

    pub fn invalid(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Invalid,
            matches_expected: false,
            value: value.into(),
            message: message.into(),
            failure: None,
        }
    }

    /// `invalid` verdict for a record that does not exist.
    pub fn not_found(kind: RecordKind) -> Self {
        let message = match kind {
            RecordKind::Mx => "No MX records found".to_owned(),
            other => format!("No {other} record found"),
        };
        Self::invalid(String::new(), message)
    }

    /// `error` verdict carrying the failure class and description.
    pub fn error(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Error,
            matches_expected: false,
            value: String::new(),
            message: message.into(),
            failure: Some(kind),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.status == VerificationStatus::Valid
    }
}
