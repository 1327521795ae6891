use crate::model::{RecordKind, Verdict};
use crate::normalize::{unquote_txt, values_match};
use crate::policy::DmarcPolicy;

use super::contains_ignore_case;

pub(super) fn check(answers: &[String], expected: Option<&str>, policy: &DmarcPolicy) -> Verdict {
    let Some(value) = answers
        .iter()
        .map(|raw| unquote_txt(raw))
        .find(|txt| contains_ignore_case(txt, "v=DMARC1"))
    else {
        return Verdict::not_found(RecordKind::Dmarc);
    };
    let lower = value.to_lowercase();

    let complete = policy.required_reporting_addresses.iter().all(|address| {
        let address = address.trim().to_lowercase();
        if policy.allow_partial_match {
            lower.contains(&address)
        } else {
            tag_value(&lower, "rua").is_some_and(|rua| rua.contains(&address))
                && tag_value(&lower, "ruf").is_some_and(|ruf| ruf.contains(&address))
        }
    });
    if !complete {
        return Verdict::review(
            value,
            "Valid DMARC record found but missing required reporting addresses",
        );
    }

    if let Some(expected) = expected.filter(|_| policy.require_exact_match) {
        if !values_match(&value, expected) {
            return Verdict::review(value, "DMARC record found but needs review");
        }
    }

    Verdict::valid(value, "DMARC record contains required reporting addresses")
}

/// Value of the `tag=` entry in a `;`-separated DMARC tag list.
fn tag_value<'a>(record: &'a str, tag: &str) -> Option<&'a str> {
    record.split(';').find_map(|entry| {
        let (name, value) = entry.split_once('=')?;
        (name.trim() == tag).then(|| value.trim())
    })
}
