// ── DoH JSON wire models ──
//
// Shapes of the `application/dns-json` format served by Cloudflare,
// Google and most public resolvers. Only the fields the checker needs
// are modelled; everything else in the body is ignored.

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// DNS response codes the client distinguishes.
pub mod rcode {
    pub const NOERROR: u16 = 0;
    pub const FORMERR: u16 = 1;
    pub const SERVFAIL: u16 = 2;
    pub const NXDOMAIN: u16 = 3;
    pub const NOTIMP: u16 = 4;
    pub const REFUSED: u16 = 5;

    /// Mnemonic for a response code, `RCODE<n>` for anything unusual.
    pub fn name(code: u16) -> String {
        match code {
            NOERROR => "NOERROR".into(),
            FORMERR => "FORMERR".into(),
            SERVFAIL => "SERVFAIL".into(),
            NXDOMAIN => "NXDOMAIN".into(),
            NOTIMP => "NOTIMP".into(),
            REFUSED => "REFUSED".into(),
            other => format!("RCODE{other}"),
        }
    }
}

/// The record type sent on the wire as the `type` query parameter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum QueryKind {
    Txt,
    Cname,
    Mx,
}

impl QueryKind {
    /// Numeric RR type code, as reported in each answer's `type` field.
    pub fn type_code(self) -> u16 {
        match self {
            Self::Txt => 16,
            Self::Cname => 5,
            Self::Mx => 15,
        }
    }
}

/// Top-level DoH JSON response.
///
/// `Answer` is absent (or empty) when the name exists but has no records
/// of the requested type, on NXDOMAIN, and on resolver-side failures such
/// as SERVFAIL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsResponse {
    #[serde(rename = "Status", default)]
    pub status: u16,

    #[serde(rename = "TC", default)]
    pub truncated: bool,

    #[serde(rename = "Answer", default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<Vec<DnsAnswer>>,
}

impl DnsResponse {
    /// Answers matching the queried type, in resolver order.
    ///
    /// Entries without a `type` are kept; entries of another type (CNAME
    /// hops in front of a TXT answer, for instance) are dropped.
    pub fn answers_for(&self, kind: QueryKind) -> impl Iterator<Item = &DnsAnswer> {
        self.answer
            .iter()
            .flatten()
            .filter(move |a| a.record_type.is_none_or(|t| t == kind.type_code()))
    }
}

/// A single resource record from the `Answer` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsAnswer {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "type", default)]
    pub record_type: Option<u16>,

    #[serde(rename = "TTL", default)]
    pub ttl: Option<u32>,

    pub data: String,
}
