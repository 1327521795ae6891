//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders verdicts in the format selected by `--output`. Table uses
//! `tabled`, structured formats use serde, plain emits one tab-separated
//! line per record for scripting.

use std::fmt;
use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use sendcheck_core::{RecordKind, RecordRequest, Verdict, VerificationStatus};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

const MAX_VALUE_WIDTH: usize = 60;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

fn paint_status(status: VerificationStatus, color: bool) -> String {
    let label = status.to_string();
    if !color {
        return label;
    }
    match status {
        VerificationStatus::Valid => label.green().to_string(),
        VerificationStatus::Review => label.yellow().to_string(),
        VerificationStatus::Invalid => label.red().to_string(),
        VerificationStatus::Error => label.magenta().to_string(),
    }
}

// ── Report rows ──────────────────────────────────────────────────────

/// One request with its verdict, as serialized for JSON / YAML.
#[derive(Debug, Serialize)]
pub struct VerdictReport<'a> {
    pub kind: RecordKind,
    pub name: &'a str,
    pub expected: Option<&'a str>,
    pub status: VerificationStatus,
    pub matches_expected: bool,
    pub value: &'a str,
    pub message: &'a str,
}

impl<'a> VerdictReport<'a> {
    pub fn new(request: &'a RecordRequest, verdict: &'a Verdict) -> Self {
        Self {
            kind: request.kind(),
            name: request.domain(),
            expected: request.expected_value(),
            status: verdict.status,
            matches_expected: verdict.matches_expected,
            value: &verdict.value,
            message: &verdict.message,
        }
    }
}

#[derive(Tabled)]
struct VerdictRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Message")]
    message: String,
}

impl VerdictRow {
    fn from_report(report: &VerdictReport<'_>, color: bool) -> Self {
        Self {
            kind: report.kind.to_string(),
            name: report.name.to_owned(),
            status: paint_status(report.status, color),
            value: truncate(report.value, MAX_VALUE_WIDTH),
            message: report.message.to_owned(),
        }
    }
}

/// Shorten each line of `value` to `max` characters.
fn truncate(value: &str, max: usize) -> String {
    value
        .lines()
        .map(|line| {
            if line.chars().count() <= max {
                line.to_owned()
            } else {
                let head: String = line.chars().take(max.saturating_sub(1)).collect();
                format!("{head}…")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render verdict reports in the chosen format.
pub fn render_reports(
    format: OutputFormat,
    reports: &[VerdictReport<'_>],
    color: bool,
) -> Result<String, CliError> {
    let rendered = match format {
        OutputFormat::Table => {
            let rows: Vec<VerdictRow> = reports
                .iter()
                .map(|r| VerdictRow::from_report(r, color))
                .collect();
            Table::new(rows).with(Style::rounded()).to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(reports)?,
        OutputFormat::JsonCompact => serde_json::to_string(reports)?,
        OutputFormat::Yaml => serde_yaml::to_string(reports)?,
        OutputFormat::Plain => reports
            .iter()
            .map(|r| format!("{}\t{}\t{}", r.status, r.kind, r.name))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(rendered)
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Summary ──────────────────────────────────────────────────────────

/// Verdict counts per status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub valid: usize,
    pub review: usize,
    pub invalid: usize,
    pub error: usize,
}

impl Summary {
    pub fn tally<'a>(verdicts: impl IntoIterator<Item = &'a Verdict>) -> Self {
        let mut summary = Self::default();
        for verdict in verdicts {
            match verdict.status {
                VerificationStatus::Valid => summary.valid += 1,
                VerificationStatus::Review => summary.review += 1,
                VerificationStatus::Invalid => summary.invalid += 1,
                VerificationStatus::Error => summary.error += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.valid + self.review + self.invalid + self.error
    }

    /// Records that are anything but `valid`.
    pub fn not_valid(&self) -> usize {
        self.total() - self.valid
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} valid, {} review, {} invalid, {} error",
            self.valid, self.review, self.invalid, self.error
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample() -> Vec<(RecordRequest, Verdict)> {
        vec![
            (
                RecordRequest::new(RecordKind::Mx, "example.com"),
                Verdict::valid(
                    "10 mxa.mailgun.org\n10 mxb.mailgun.org",
                    "MX records match configuration exactly",
                ),
            ),
            (
                RecordRequest::new(RecordKind::Cname, "mg.example.com").with_expected("mailgun.org"),
                Verdict::not_found(RecordKind::Cname),
            ),
        ]
    }

    fn reports(pairs: &[(RecordRequest, Verdict)]) -> Vec<VerdictReport<'_>> {
        pairs.iter().map(|(r, v)| VerdictReport::new(r, v)).collect()
    }

    #[test]
    fn json_report_shape() {
        let pairs = sample();
        let json = render_reports(OutputFormat::JsonCompact, &reports(&pairs), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(
            value[1],
            serde_json::json!({
                "kind": "CNAME",
                "name": "mg.example.com",
                "expected": "mailgun.org",
                "status": "invalid",
                "matches_expected": false,
                "value": "",
                "message": "No CNAME record found"
            })
        );
        assert_eq!(value[0]["expected"], serde_json::Value::Null);
    }

    #[test]
    fn plain_is_tab_separated() {
        let pairs = sample();
        let plain = render_reports(OutputFormat::Plain, &reports(&pairs), false).unwrap();
        assert_eq!(plain, "valid\tMX\texample.com\ninvalid\tCNAME\tmg.example.com");
    }

    #[test]
    fn table_has_headers_and_no_color_codes() {
        let pairs = sample();
        let table = render_reports(OutputFormat::Table, &reports(&pairs), false).unwrap();
        for header in ["Kind", "Name", "Status", "Value", "Message"] {
            assert!(table.contains(header), "{table}");
        }
        assert!(!table.contains('\u{1b}'));
    }

    #[test]
    fn colored_status_has_escape_codes() {
        assert!(paint_status(VerificationStatus::Review, true).contains('\u{1b}'));
        assert_eq!(paint_status(VerificationStatus::Review, false), "review");
    }

    #[test]
    fn long_values_are_truncated_per_line() {
        let long = "p=".to_owned() + &"A".repeat(100);
        let out = truncate(&format!("short\n{long}"), 10);
        assert_eq!(out, "short\np=AAAAAAA…");
    }

    #[test]
    fn summary_counts_each_status() {
        let pairs = sample();
        let summary = Summary::tally(pairs.iter().map(|(_, v)| v));
        assert_eq!(summary.to_string(), "1 valid, 0 review, 1 invalid, 0 error");
        assert_eq!(summary.not_valid(), 1);
    }
}
