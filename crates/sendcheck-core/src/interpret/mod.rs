// ── Record interpreters ──
//
// One pure function per record kind. Each takes the raw answer strings from
// the resolver, the caller's expected value and its policy slice, and
// returns a verdict. No I/O and no shared state, so they are safe to call
// from any number of concurrent checks.

mod cname;
mod dkim;
mod dmarc;
mod mx;
mod spf;

use crate::error::CoreError;
use crate::model::{RecordKind, Verdict};
use crate::policy::PolicyConfig;

pub use mx::{MxRecord, parse_mx};

/// Interpret `answers` as records of `kind`.
///
/// Only MX can fail: an answer that is not a `priority host` pair is
/// [`CoreError::MalformedAnswer`]. Every other outcome is a verdict.
pub fn interpret(
    kind: RecordKind,
    answers: &[String],
    expected: Option<&str>,
    policy: &PolicyConfig,
) -> Result<Verdict, CoreError> {
    let verdict = match kind {
        RecordKind::Spf => spf::check(answers, &policy.spf),
        RecordKind::Dkim => dkim::check(answers, expected, policy.dkim),
        RecordKind::Dmarc => dmarc::check(answers, expected, &policy.dmarc),
        RecordKind::Cname => cname::check(answers, expected, policy.cname),
        RecordKind::Mx => mx::check(answers, expected, &policy.mx)?,
    };
    Ok(verdict)
}

/// Case-insensitive substring test.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
