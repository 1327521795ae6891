use std::fmt;

use crate::error::CoreError;
use crate::model::{RecordKind, Verdict};
use crate::normalize::strip_root_dot;
use crate::policy::MxPolicy;

/// One mail exchanger as read from an MX answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    pub priority: u16,
    pub host: String,
}

impl fmt::Display for MxRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.priority, self.host)
    }
}

/// Parse `priority host` answer data, dropping the host's trailing dot.
pub fn parse_mx(data: &str) -> Result<MxRecord, CoreError> {
    let malformed = || CoreError::MalformedAnswer {
        kind: RecordKind::Mx,
        data: data.to_owned(),
    };

    let mut parts = data.split_whitespace();
    let (Some(priority), Some(host), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let priority = priority.parse::<u16>().map_err(|_| malformed())?;
    let host = strip_root_dot(host);
    if host.is_empty() {
        return Err(malformed());
    }

    Ok(MxRecord {
        priority,
        host: host.to_owned(),
    })
}

pub(super) fn check(
    answers: &[String],
    expected: Option<&str>,
    policy: &MxPolicy,
) -> Result<Verdict, CoreError> {
    if answers.is_empty() {
        return Ok(Verdict::not_found(RecordKind::Mx));
    }

    let mut actual = answers
        .iter()
        .map(|raw| parse_mx(raw).map(|record| record.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    actual.sort();
    let value = actual.join("\n");

    let required: Vec<String> = match expected {
        Some(expected) => expected
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .collect(),
        None => policy.required_records.clone(),
    };

    let present = required
        .iter()
        .filter(|record| {
            let wanted = strip_root_dot(record.trim());
            actual.iter().any(|have| have.eq_ignore_ascii_case(wanted))
        })
        .count();
    let all_present = present == required.len();

    let matches = if policy.require_exact_match {
        all_present && actual.len() == required.len()
    } else {
        all_present
    };

    if matches {
        return Ok(Verdict::valid(value, "MX records match configuration exactly"));
    }
    if policy.allow_partial_match {
        let message = format!(
            "MX records found but need review ({present} of {} required records present)",
            required.len()
        );
        return Ok(Verdict::review(value, message));
    }
    Ok(Verdict::review(value, "MX records found but need review"))
}
