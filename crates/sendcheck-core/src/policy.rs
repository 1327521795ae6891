// ── Policy configuration ──
//
// Per-kind matching rules consumed by the interpreters. Defaults encode the
// sending provider's published setup. The config crate deserializes and
// validates these; core only reads them, and a verification pass shares one
// snapshot by reference.

use serde::{Deserialize, Serialize};

/// Matching rules for every record kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub spf: SpfPolicy,
    pub dkim: MatchPolicy,
    pub dmarc: DmarcPolicy,
    pub cname: MatchPolicy,
    pub mx: MxPolicy,
}

/// Flags shared by the value-comparison kinds (DKIM, CNAME).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchPolicy {
    /// Compare the record with the expected value. When `false`, any
    /// existing record passes.
    pub require_exact_match: bool,
    /// Report near-misses in the review message.
    pub allow_partial_match: bool,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            require_exact_match: true,
            allow_partial_match: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpfPolicy {
    /// Accepted for a uniform policy shape; SPF verdicts come from the
    /// includes and `all` modifier only.
    pub require_exact_match: bool,
    /// `true`: an include may appear anywhere in the record.
    /// `false`: it must be a whole whitespace-delimited term.
    pub allow_partial_match: bool,
    pub required_includes: Vec<String>,
    pub valid_all_modifiers: Vec<String>,
}

impl Default for SpfPolicy {
    fn default() -> Self {
        Self {
            require_exact_match: false,
            allow_partial_match: true,
            required_includes: vec!["include:_spf.cordialmail.net".into()],
            valid_all_modifiers: vec!["-all".into(), "~all".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DmarcPolicy {
    pub require_exact_match: bool,
    /// `true`: an address may appear anywhere in the record.
    /// `false`: it must appear in both the `rua=` and `ruf=` tags.
    pub allow_partial_match: bool,
    pub required_reporting_addresses: Vec<String>,
}

impl Default for DmarcPolicy {
    fn default() -> Self {
        Self {
            require_exact_match: false,
            allow_partial_match: true,
            required_reporting_addresses: vec!["@dmarc.cordialmail.net".into()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MxPolicy {
    /// `true`: the record set must equal `required_records`.
    /// `false`: extra records are tolerated.
    pub require_exact_match: bool,
    pub allow_partial_match: bool,
    /// `priority host` strings, e.g. `10 mxa.mailgun.org`.
    pub required_records: Vec<String>,
}

impl Default for MxPolicy {
    fn default() -> Self {
        Self {
            require_exact_match: true,
            allow_partial_match: true,
            required_records: vec!["10 mxa.mailgun.org".into(), "10 mxb.mailgun.org".into()],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let policy: PolicyConfig = serde_json::from_value(serde_json::json!({
            "spf": { "required_includes": ["include:other.net"] },
            "mx": { "require_exact_match": false }
        }))
        .unwrap();

        assert_eq!(policy.spf.required_includes, vec!["include:other.net"]);
        assert_eq!(policy.spf.valid_all_modifiers, vec!["-all", "~all"]);
        assert!(!policy.mx.require_exact_match);
        assert_eq!(policy.mx.required_records.len(), 2);
        assert_eq!(policy.dkim, MatchPolicy::default());
    }

    #[test]
    fn defaults_match_provider_setup() {
        let policy = PolicyConfig::default();
        assert!(!policy.spf.require_exact_match);
        assert!(policy.dkim.require_exact_match);
        assert!(policy.cname.require_exact_match);
        assert_eq!(
            policy.dmarc.required_reporting_addresses,
            vec!["@dmarc.cordialmail.net"]
        );
    }
}
