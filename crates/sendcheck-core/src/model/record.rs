// ── Record requests ──
//
// What the caller asks to have checked: a record kind, the DNS name to
// query, and optionally the value the caller expects to find there.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use sendcheck_api::QueryKind;

/// The five email-authentication record kinds the checker understands.
///
/// Closed set: every dispatch over it is an exhaustive `match`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RecordKind {
    Spf,
    Dkim,
    Dmarc,
    Cname,
    Mx,
}

impl RecordKind {
    /// The DNS record type queried on the wire for this kind.
    pub fn query_kind(self) -> QueryKind {
        match self {
            Self::Spf | Self::Dkim | Self::Dmarc => QueryKind::Txt,
            Self::Cname => QueryKind::Cname,
            Self::Mx => QueryKind::Mx,
        }
    }
}

/// One record to verify. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRequest {
    kind: RecordKind,
    #[serde(rename = "name")]
    domain: String,
    #[serde(rename = "expected", default, skip_serializing_if = "Option::is_none")]
    expected_value: Option<String>,
}

impl RecordRequest {
    /// Request a check of `kind` at `domain` with no expected value.
    pub fn new(kind: RecordKind, domain: impl Into<String>) -> Self {
        Self {
            kind,
            domain: domain.into().trim().to_owned(),
            expected_value: None,
        }
    }

    /// Attach an expected value. Blank values are treated as absent.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        self.expected_value = if expected.trim().is_empty() {
            None
        } else {
            Some(expected)
        };
        self
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// The DNS name queried for this record.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn expected_value(&self) -> Option<&str> {
        self.expected_value.as_deref()
    }
}
