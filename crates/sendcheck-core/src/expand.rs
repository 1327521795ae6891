// ── Domain expansion ──
//
// A bare sending domain becomes the five standard lookups. Host naming
// follows the provider's conventions, which are configurable.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::{RecordKind, RecordRequest};
use crate::normalize::strip_root_dot;

/// Provider naming conventions used to derive lookup names from a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConventions {
    /// DKIM selector, queried at `<selector>._domainkey.<domain>`.
    pub dkim_selector: String,
    /// Label of the tracking CNAME, queried at `<prefix>.<domain>`.
    pub cname_prefix: String,
    /// Expected target of the tracking CNAME.
    pub cname_target: String,
}

impl Default for DomainConventions {
    fn default() -> Self {
        Self {
            dkim_selector: "crdl01".into(),
            cname_prefix: "mg".into(),
            cname_target: "mailgun.org".into(),
        }
    }
}

/// Trim, lower-case and drop the root dot. Empty or space-containing input
/// is rejected.
pub fn normalize_domain(domain: &str) -> Result<String, CoreError> {
    let normalized = strip_root_dot(domain.trim()).to_lowercase();
    if normalized.is_empty() || normalized.contains(char::is_whitespace) {
        return Err(CoreError::InvalidDomain {
            domain: domain.to_owned(),
        });
    }
    Ok(normalized)
}

/// SPF, DKIM, DMARC, CNAME and MX requests for `domain`, in that order.
pub fn domain_requests(
    domain: &str,
    conventions: &DomainConventions,
) -> Result<Vec<RecordRequest>, CoreError> {
    let domain = normalize_domain(domain)?;

    Ok(vec![
        RecordRequest::new(RecordKind::Spf, domain.clone()),
        RecordRequest::new(
            RecordKind::Dkim,
            format!("{}._domainkey.{domain}", conventions.dkim_selector),
        ),
        RecordRequest::new(RecordKind::Dmarc, format!("_dmarc.{domain}")),
        RecordRequest::new(
            RecordKind::Cname,
            format!("{}.{domain}", conventions.cname_prefix),
        )
        .with_expected(conventions.cname_target.clone()),
        RecordRequest::new(RecordKind::Mx, domain),
    ])
}
