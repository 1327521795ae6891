//! Batch input parsing: CSV exports and tab-separated paste data.
//!
//! Both formats describe one sending domain per row with host / expected
//! value pairs per record kind. Rows are turned into `RecordRequest`s in
//! SPF, DKIM, CNAME, DMARC, MX order; blank cells produce no request.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use sendcheck_core::{RecordKind, RecordRequest};

use crate::cli::BatchFormat;
use crate::error::CliError;

/// Placeholder some exports put in MX cells that must be left alone.
const DO_NOT_MODIFY: &str = "Do not modify";
const DEFAULT_MX_PRIORITY: &str = "10";
const MIN_TSV_COLUMNS: usize = 10;

// ── CSV ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    sending_domain: String,
    #[serde(rename = "SPF host")]
    spf_host: String,
    #[serde(rename = "SPF record (TXT record type)")]
    spf_record: String,
    #[serde(rename = "DKIM host")]
    dkim_host: String,
    #[serde(rename = "DKIM record (TXT record type)")]
    dkim_record: String,
    #[serde(rename = "CNAME host")]
    cname_host: String,
    #[serde(rename = "CNAME record")]
    cname_record: String,
    #[serde(rename = "DMARC host")]
    dmarc_host: String,
    #[serde(rename = "DMARC record (TXT record type)")]
    dmarc_record: String,
    #[serde(rename = "MX host")]
    mx_host: String,
    #[serde(rename = "MX record A")]
    mx_record_a: String,
    #[serde(rename = "MX record B")]
    mx_record_b: String,
    #[serde(rename = "MX priority")]
    mx_priority: String,
}

/// Parse a CSV export with a header row.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<RecordRequest>, CliError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut requests = Vec::new();
    for (index, row) in csv.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        if row.sending_domain.is_empty() {
            warn!(row = index + 1, "skipping CSV row without sending_domain");
            continue;
        }

        push_pair(&mut requests, RecordKind::Spf, &row.spf_host, &row.spf_record);
        push_pair(&mut requests, RecordKind::Dkim, &row.dkim_host, &row.dkim_record);
        push_pair(&mut requests, RecordKind::Cname, &row.cname_host, &row.cname_record);
        push_pair(&mut requests, RecordKind::Dmarc, &row.dmarc_host, &row.dmarc_record);

        let priority = non_empty(&row.mx_priority).unwrap_or(DEFAULT_MX_PRIORITY);
        push_mx(
            &mut requests,
            &row.mx_host,
            [row.mx_record_a.as_str(), row.mx_record_b.as_str()],
            priority,
        );
    }
    Ok(requests)
}

// ── Tab-separated ───────────────────────────────────────────────────

/// Parse tab-separated rows with fixed column positions.
///
/// Lines with fewer than ten fields are skipped.
pub fn parse_tsv(text: &str) -> Vec<RecordRequest> {
    let mut requests = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        if fields.len() < MIN_TSV_COLUMNS {
            if !line.trim().is_empty() {
                debug!(line = index + 1, columns = fields.len(), "skipping short line");
            }
            continue;
        }
        let field = |i: usize| fields.get(i).copied().unwrap_or_default();

        push_pair(&mut requests, RecordKind::Spf, field(1), field(2));
        push_pair(&mut requests, RecordKind::Dkim, field(3), field(4));
        push_pair(&mut requests, RecordKind::Cname, field(5), field(6));
        push_pair(&mut requests, RecordKind::Dmarc, field(7), field(8));

        let priority = non_empty(field(12)).unwrap_or(DEFAULT_MX_PRIORITY);
        push_mx(&mut requests, field(9), [field(10), field(11)], priority);
    }

    requests
}

// ── Shared row helpers ──────────────────────────────────────────────

fn non_empty(cell: &str) -> Option<&str> {
    let cell = cell.trim();
    (!cell.is_empty()).then_some(cell)
}

fn push_pair(requests: &mut Vec<RecordRequest>, kind: RecordKind, host: &str, record: &str) {
    if let (Some(host), Some(record)) = (non_empty(host), non_empty(record)) {
        requests.push(RecordRequest::new(kind, host).with_expected(record));
    }
}

/// One MX request whose expected value lists each usable record as
/// `priority host`, one per line.
fn push_mx(requests: &mut Vec<RecordRequest>, host: &str, records: [&str; 2], priority: &str) {
    let Some(host) = non_empty(host) else {
        return;
    };
    let expected: Vec<String> = records
        .into_iter()
        .filter_map(non_empty)
        .filter(|r| *r != DO_NOT_MODIFY)
        .map(|r| format!("{priority} {r}"))
        .collect();

    if !expected.is_empty() {
        requests.push(RecordRequest::new(RecordKind::Mx, host).with_expected(expected.join("\n")));
    }
}

// ── Source loading ──────────────────────────────────────────────────

/// Pick the parser for `auto`: CSV for `.csv` paths or a header naming
/// `sending_domain`, tab-separated otherwise.
pub fn detect_format(path: &Path, text: &str) -> BatchFormat {
    let is_csv_path = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    let has_csv_header = text
        .lines()
        .next()
        .is_some_and(|first| first.contains("sending_domain"));

    if is_csv_path || has_csv_header {
        BatchFormat::Csv
    } else {
        BatchFormat::Tsv
    }
}

/// Read `path` (or stdin for `-`) and parse it into requests.
pub fn read_batch(path: &Path, format: BatchFormat) -> Result<Vec<RecordRequest>, CliError> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    let format = match format {
        BatchFormat::Auto => detect_format(path, &text),
        explicit => explicit,
    };
    debug!(path = %path.display(), ?format, "parsing batch input");

    let requests = match format {
        BatchFormat::Csv => parse_csv(text.as_bytes())?,
        BatchFormat::Tsv | BatchFormat::Auto => parse_tsv(&text),
    };

    if requests.is_empty() {
        return Err(CliError::EmptyBatch {
            source_name: path.display().to_string(),
        });
    }
    Ok(requests)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn summary(requests: &[RecordRequest]) -> Vec<(RecordKind, &str, Option<&str>)> {
        requests
            .iter()
            .map(|r| (r.kind(), r.domain(), r.expected_value()))
            .collect()
    }

    const CSV_HEADER: &str = "sending_domain,SPF host,SPF record (TXT record type),DKIM host,\
        DKIM record (TXT record type),CNAME host,CNAME record,DMARC host,\
        DMARC record (TXT record type),MX host,MX record A,MX record B,MX priority";

    #[test]
    fn csv_rows_expand_per_kind() {
        let data = format!(
            "{CSV_HEADER}\n\
             example.com,example.com,v=spf1 include:_spf.cordialmail.net ~all,\
             crdl01._domainkey.example.com,\"v=DKIM1; k=rsa; p=ABC\",mg.example.com,mailgun.org,\
             _dmarc.example.com,v=DMARC1; p=none,example.com,mxa.mailgun.org,mxb.mailgun.org,5\n"
        );

        let requests = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(
            summary(&requests),
            vec![
                (RecordKind::Spf, "example.com", Some("v=spf1 include:_spf.cordialmail.net ~all")),
                (RecordKind::Dkim, "crdl01._domainkey.example.com", Some("v=DKIM1; k=rsa; p=ABC")),
                (RecordKind::Cname, "mg.example.com", Some("mailgun.org")),
                (RecordKind::Dmarc, "_dmarc.example.com", Some("v=DMARC1; p=none")),
                (RecordKind::Mx, "example.com", Some("5 mxa.mailgun.org\n5 mxb.mailgun.org")),
            ]
        );
    }

    #[test]
    fn csv_skips_rows_without_sending_domain_and_blank_pairs() {
        let data = format!(
            "{CSV_HEADER}\n\
             ,example.com,v=spf1 ~all,,,,,,,,,,\n\
             other.com,other.com,,,,mg.other.com,mailgun.org,,,other.com,,mxb.mailgun.org,\n"
        );

        let requests = parse_csv(data.as_bytes()).unwrap();
        assert_eq!(
            summary(&requests),
            vec![
                (RecordKind::Cname, "mg.other.com", Some("mailgun.org")),
                (RecordKind::Mx, "other.com", Some("10 mxb.mailgun.org")),
            ]
        );
    }

    #[test]
    fn tsv_uses_fixed_positions() {
        let line = [
            "example.com",
            "example.com",
            "v=spf1 include:_spf.cordialmail.net ~all",
            "crdl01._domainkey.example.com",
            "v=DKIM1; k=rsa; p=ABC",
            "mg.example.com",
            "mailgun.org",
            "_dmarc.example.com",
            "v=DMARC1; p=none",
            "example.com",
            "mxa.mailgun.org",
            "Do not modify",
        ]
        .join("\t");

        let requests = parse_tsv(&format!("too\tshort\n{line}\n"));
        assert_eq!(requests.len(), 5);
        assert_eq!(requests[2].kind(), RecordKind::Cname);
        assert_eq!(requests[3].kind(), RecordKind::Dmarc);
        assert_eq!(requests[4].expected_value(), Some("10 mxa.mailgun.org"));
    }

    #[test]
    fn tsv_mx_all_placeholders_yields_no_request() {
        let line = ["d.com", "", "", "", "", "", "", "", "", "d.com", "Do not modify", "Do not modify", "20"]
            .join("\t");
        assert!(parse_tsv(&line).is_empty());
    }

    #[test]
    fn auto_detection() {
        assert_eq!(detect_format(Path::new("records.CSV"), "a\tb"), BatchFormat::Csv);
        assert_eq!(
            detect_format(Path::new("-"), "sending_domain,SPF host\n"),
            BatchFormat::Csv
        );
        assert_eq!(detect_format(Path::new("paste.txt"), "a\tb\tc"), BatchFormat::Tsv);
    }

    #[test]
    fn empty_batch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.tsv");
        std::fs::write(&path, "only\tthree\tcolumns\n").unwrap();

        let err = read_batch(&path, BatchFormat::Auto).unwrap_err();
        assert!(matches!(err, CliError::EmptyBatch { .. }));
    }
}
