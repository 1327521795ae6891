// ── Core error types ──
//
// Failures that stop a single record check. The verifier converts every
// one of them into an `error` verdict, so callers of `Verifier::verify`
// never see these directly. A missing record or a policy violation is
// never an error -- those are verdict states.

use thiserror::Error;

use crate::model::{FailureKind, RecordKind};

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Resolver errors ──────────────────────────────────────────────
    /// Transport failure, non-success HTTP status, or failing DNS rcode.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The resolver request exceeded the transport timeout.
    #[error("Network error: Resolver request timed out: {message}")]
    Timeout { message: String },

    /// The resolver responded with a body that is not valid DNS JSON.
    #[error("Parse error: {message}")]
    Parse { message: String },

    // ── Interpretation errors ────────────────────────────────────────
    /// An answer that cannot be read as its record kind
    /// (e.g. an MX answer that is not `priority host`).
    #[error("Malformed {kind} answer: {data:?}")]
    MalformedAnswer { kind: RecordKind, data: String },

    // ── Request errors ───────────────────────────────────────────────
    #[error("Invalid domain: {domain:?}")]
    InvalidDomain { domain: String },
}

impl CoreError {
    /// Returns `true` if the failure happened before any answer was read.
    pub fn is_resolver_failure(&self) -> bool {
        self.failure_kind().is_resolver_failure()
    }

    /// The verdict-level class of this failure.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::Network { .. } => FailureKind::Network,
            Self::Timeout { .. } => FailureKind::Timeout,
            Self::Parse { .. } => FailureKind::Parse,
            Self::MalformedAnswer { .. } => FailureKind::MalformedAnswer,
            Self::InvalidDomain { .. } => FailureKind::InvalidDomain,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sendcheck_api::Error> for CoreError {
    fn from(err: sendcheck_api::Error) -> Self {
        match err {
            sendcheck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Parse { message }
            }
            sendcheck_api::Error::InvalidUrl(e) => CoreError::Network {
                message: format!("Invalid resolver URL: {e}"),
            },
            sendcheck_api::Error::Transport(ref e) if e.is_timeout() => CoreError::Timeout {
                message: e.to_string(),
            },
            other => CoreError::Network {
                message: other.to_string(),
            },
        }
    }
}
