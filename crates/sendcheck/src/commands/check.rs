//! Check command handlers: `domain`, `record`, `batch`.

use std::io::IsTerminal;
use std::pin::pin;

use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use sendcheck_api::DohClient;
use sendcheck_config::Config;
use sendcheck_core::{FailureKind, RecordKind, RecordRequest, Verdict, Verifier, domain_requests};

use crate::cli::{BatchArgs, DomainArgs, GlobalOpts, RecordArgs, RecordKindArg};
use crate::error::CliError;
use crate::input;
use crate::output::{self, Summary, VerdictReport};

// ── Handlers ────────────────────────────────────────────────────────

pub async fn domain(args: DomainArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let mut requests = Vec::with_capacity(args.domains.len() * 5);
    for domain in &args.domains {
        requests.extend(domain_requests(domain, &cfg.conventions)?);
    }
    run_checks(&requests, cfg, global).await
}

pub async fn record(args: RecordArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let mut request = RecordRequest::new(record_kind(args.kind), args.name);
    if let Some(expected) = args.expected {
        request = request.with_expected(expected);
    }
    run_checks(&[request], cfg, global).await
}

pub async fn batch(args: BatchArgs, cfg: &Config, global: &GlobalOpts) -> Result<(), CliError> {
    let requests = input::read_batch(&args.file, args.format)?;
    info!(count = requests.len(), "loaded batch");
    run_checks(&requests, cfg, global).await
}

fn record_kind(arg: RecordKindArg) -> RecordKind {
    match arg {
        RecordKindArg::Spf => RecordKind::Spf,
        RecordKindArg::Dkim => RecordKind::Dkim,
        RecordKindArg::Dmarc => RecordKind::Dmarc,
        RecordKindArg::Cname => RecordKind::Cname,
        RecordKindArg::Mx => RecordKind::Mx,
    }
}

// ── Shared pipeline ─────────────────────────────────────────────────

/// Verify `requests`, render the verdicts, and turn the overall outcome
/// into an exit status.
async fn run_checks(
    requests: &[RecordRequest],
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = DohClient::new(cfg.endpoint_url()?, &cfg.transport_config())?;
    let verifier = Verifier::new(client);
    debug!(
        endpoint = %verifier.resolver().endpoint(),
        count = requests.len(),
        concurrency = cfg.resolver.concurrency,
        "running checks"
    );

    let verdicts = collect_verdicts(&verifier, requests, cfg, global.quiet).await?;

    let reports: Vec<VerdictReport<'_>> = requests
        .iter()
        .zip(&verdicts)
        .map(|(request, verdict)| VerdictReport::new(request, verdict))
        .collect();
    let rendered =
        output::render_reports(global.output, &reports, output::should_color(global.color))?;
    output::print_output(&rendered, global.quiet);

    let summary = Summary::tally(&verdicts);
    if !global.quiet {
        eprintln!("{summary}");
    }

    outcome(&summary, &verdicts, cfg, global.strict)
}

/// Drive the verdict stream, abandoning it on Ctrl-C.
async fn collect_verdicts(
    verifier: &Verifier<DohClient>,
    requests: &[RecordRequest],
    cfg: &Config,
    quiet: bool,
) -> Result<Vec<Verdict>, CliError> {
    let cancel = CancellationToken::new();
    let signal = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let progress = progress_bar(requests.len(), quiet);
    let mut stream = pin!(verifier.verify_stream(requests, &cfg.policy, cfg.resolver.concurrency));
    let mut verdicts = Vec::with_capacity(requests.len());

    let interrupted = loop {
        tokio::select! {
            () = cancel.cancelled() => break true,
            next = stream.next() => match next {
                Some(verdict) => {
                    progress.inc(1);
                    verdicts.push(verdict);
                }
                None => break false,
            },
        }
    };

    signal.abort();
    progress.finish_and_clear();

    if interrupted {
        return Err(CliError::Interrupted);
    }
    Ok(verdicts)
}

fn progress_bar(len: usize, quiet: bool) -> ProgressBar {
    if quiet || len < 2 || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(u64::try_from(len).unwrap_or(u64::MAX));
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} records") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

/// Map the verdict set to the process outcome.
///
/// A run where every check failed at the resolver is reported as a
/// connection (or timeout) failure rather than as a set of verdicts.
fn outcome(
    summary: &Summary,
    verdicts: &[Verdict],
    cfg: &Config,
    strict: bool,
) -> Result<(), CliError> {
    let lookup_failed = |v: &Verdict| {
        matches!(
            v.failure,
            Some(FailureKind::Network | FailureKind::Timeout)
        )
    };
    let resolver_down = !verdicts.is_empty() && verdicts.iter().all(lookup_failed);

    if resolver_down {
        if verdicts
            .iter()
            .all(|v| v.failure == Some(FailureKind::Timeout))
        {
            return Err(CliError::Timeout {
                seconds: cfg.resolver.timeout,
            });
        }
        return Err(CliError::ConnectionFailed {
            endpoint: cfg.resolver.endpoint.clone(),
            reason: verdicts
                .first()
                .map(|v| v.message.clone())
                .unwrap_or_default(),
        });
    }

    if strict && summary.not_valid() > 0 {
        return Err(CliError::ChecksFailed {
            failed: summary.not_valid(),
            total: summary.total(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn network_error(message: &str) -> Verdict {
        Verdict::error(FailureKind::Network, format!("Network error: {message}"))
    }

    fn timeout_error() -> Verdict {
        Verdict::error(
            FailureKind::Timeout,
            "Network error: Resolver request timed out: deadline",
        )
    }

    #[test]
    fn all_network_errors_mean_resolver_down() {
        let verdicts = vec![network_error("connection refused"), network_error("connection refused")];
        let err = outcome(&Summary::tally(&verdicts), &verdicts, &Config::default(), false).unwrap_err();
        assert!(matches!(err, CliError::ConnectionFailed { .. }));
    }

    #[test]
    fn all_timeouts_map_to_timeout() {
        let verdicts = vec![timeout_error(), timeout_error()];
        let err = outcome(&Summary::tally(&verdicts), &verdicts, &Config::default(), false).unwrap_err();
        assert!(matches!(err, CliError::Timeout { seconds: 10 }));
    }

    #[test]
    fn classification_ignores_message_wording() {
        let reworded = vec![Verdict::error(FailureKind::Timeout, "resolver too slow")];
        let err = outcome(&Summary::tally(&reworded), &reworded, &Config::default(), false).unwrap_err();
        assert!(matches!(err, CliError::Timeout { .. }));

        let mixed = vec![timeout_error(), network_error("refused")];
        let err = outcome(&Summary::tally(&mixed), &mixed, &Config::default(), false).unwrap_err();
        assert!(matches!(err, CliError::ConnectionFailed { .. }));

        let parse = vec![Verdict::error(FailureKind::Parse, "Network error: lookalike")];
        assert!(outcome(&Summary::tally(&parse), &parse, &Config::default(), false).is_ok());
    }

    #[test]
    fn strict_fails_on_any_non_valid() {
        let verdicts = vec![Verdict::valid("v", "ok"), Verdict::review("v", "hm")];
        let summary = Summary::tally(&verdicts);

        assert!(outcome(&summary, &verdicts, &Config::default(), false).is_ok());
        let err = outcome(&summary, &verdicts, &Config::default(), true).unwrap_err();
        assert!(matches!(err, CliError::ChecksFailed { failed: 1, total: 2 }));
    }

    #[test]
    fn mixed_errors_are_reported_as_verdicts() {
        let verdicts = vec![network_error("refused"), Verdict::valid("v", "ok")];
        assert!(outcome(&Summary::tally(&verdicts), &verdicts, &Config::default(), false).is_ok());
    }
}
