use crate::model::{RecordKind, Verdict};
use crate::normalize::unquote_txt;
use crate::policy::SpfPolicy;

use super::contains_ignore_case;

/// SPF is judged on policy alone: required includes and the terminal `all`
/// modifier. Any expected value on the request is not consulted.
pub(super) fn check(answers: &[String], policy: &SpfPolicy) -> Verdict {
    let Some(value) = answers
        .iter()
        .map(|raw| unquote_txt(raw))
        .find(|txt| contains_ignore_case(txt, "v=spf1"))
    else {
        return Verdict::not_found(RecordKind::Spf);
    };
    let lower = value.trim().to_lowercase();

    for include in &policy.required_includes {
        let needle = include.trim().to_lowercase();
        let present = if policy.allow_partial_match {
            lower.contains(&needle)
        } else {
            lower.split_whitespace().any(|term| term == needle)
        };
        if !present {
            return Verdict::invalid(value, format!("SPF record is missing required {include}"));
        }
    }

    let terminated = policy
        .valid_all_modifiers
        .iter()
        .any(|modifier| lower.ends_with(&modifier.trim().to_lowercase()));
    if !terminated {
        return Verdict::invalid(
            value,
            format!(
                "SPF record must end with one of: {}",
                policy.valid_all_modifiers.join(", ")
            ),
        );
    }

    Verdict::valid(value, "SPF record contains the required includes")
}
