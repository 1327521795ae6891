use crate::model::{RecordKind, Verdict};
use crate::normalize::{normalize_for_compare, strip_root_dot, values_match};
use crate::policy::MatchPolicy;

pub(super) fn check(answers: &[String], expected: Option<&str>, policy: MatchPolicy) -> Verdict {
    let Some(first) = answers.first() else {
        return Verdict::not_found(RecordKind::Cname);
    };
    let value = strip_root_dot(first.trim()).to_owned();

    let Some(expected) = expected.filter(|_| policy.require_exact_match) else {
        return Verdict::valid(value, "CNAME record found");
    };
    let expected = strip_root_dot(expected.trim());

    if values_match(&value, expected) {
        Verdict::valid(value, "CNAME record matches exactly")
    } else if policy.allow_partial_match && is_subdomain_of(&value, expected) {
        let message = format!("CNAME target is a subdomain of {expected}");
        Verdict::review(value, message)
    } else {
        Verdict::review(value, "CNAME record found but needs review")
    }
}

fn is_subdomain_of(name: &str, parent: &str) -> bool {
    let name = normalize_for_compare(name);
    let parent = normalize_for_compare(parent);
    !parent.is_empty() && name.ends_with(&format!(".{parent}"))
}
