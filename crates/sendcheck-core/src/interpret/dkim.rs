use crate::model::{RecordKind, Verdict};
use crate::normalize::{partially_matches, unquote_txt, values_match};
use crate::policy::MatchPolicy;

use super::contains_ignore_case;

pub(super) fn check(answers: &[String], expected: Option<&str>, policy: MatchPolicy) -> Verdict {
    let Some(value) = answers
        .iter()
        .map(|raw| unquote_txt(raw))
        .find(|txt| contains_ignore_case(txt, "v=DKIM1") || contains_ignore_case(txt, "k=rsa"))
    else {
        return Verdict::not_found(RecordKind::Dkim);
    };

    let Some(expected) = expected.filter(|_| policy.require_exact_match) else {
        return Verdict::valid(value, "DKIM record found");
    };

    if values_match(&value, expected) {
        Verdict::valid(value, "DKIM record matches exactly")
    } else if policy.allow_partial_match && partially_matches(&value, expected) {
        Verdict::review(value, "DKIM record partially matches the expected value")
    } else {
        Verdict::review(value, "DKIM record found but needs review")
    }
}
