// ── Verification orchestrator ──
//
// Resolve, interpret, classify. Every request ends in exactly one verdict:
// resolver and interpretation failures are folded into `error` verdicts
// here and never reach the caller as `Err`.

use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::interpret::interpret;
use crate::model::{RecordRequest, Verdict};
use crate::policy::PolicyConfig;
use crate::resolver::Resolve;

/// In-flight checks allowed by [`Verifier::verify_all`] unless configured.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Runs record checks against a resolver.
///
/// Holds no mutable state; one verifier can serve any number of concurrent
/// checks. Dropping a pending check abandons it without side effects.
#[derive(Debug, Clone)]
pub struct Verifier<R> {
    resolver: R,
}

impl<R: Resolve> Verifier<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Check one record. Always produces a verdict.
    pub async fn verify(&self, request: &RecordRequest, policy: &PolicyConfig) -> Verdict {
        let kind = request.kind();
        let name = request.domain();

        match self.try_verify(request, policy).await {
            Ok(verdict) => {
                debug!(%kind, name, status = %verdict.status, "record checked");
                verdict
            }
            Err(e) if e.is_resolver_failure() => {
                warn!(%kind, name, error = %e, "resolver lookup failed");
                Verdict::error(e.failure_kind(), e.to_string())
            }
            Err(e) => {
                debug!(%kind, name, error = %e, "record check failed");
                Verdict::error(e.failure_kind(), e.to_string())
            }
        }
    }

    async fn try_verify(
        &self,
        request: &RecordRequest,
        policy: &PolicyConfig,
    ) -> Result<Verdict, CoreError> {
        if request.domain().is_empty() {
            return Err(CoreError::InvalidDomain {
                domain: String::new(),
            });
        }

        let answers = self
            .resolver
            .resolve(request.domain(), request.kind().query_kind())
            .await?;

        interpret(
            request.kind(),
            &answers,
            request.expected_value(),
            policy,
        )
    }

    /// Verdicts for `requests`, yielded in request order with at most
    /// `concurrency` checks in flight.
    pub fn verify_stream<'a>(
        &'a self,
        requests: &'a [RecordRequest],
        policy: &'a PolicyConfig,
        concurrency: usize,
    ) -> impl Stream<Item = Verdict> + 'a {
        stream::iter(requests)
            .map(move |request| self.verify(request, policy))
            .buffered(concurrency.max(1))
    }

    /// Check a batch. `verdicts[i]` belongs to `requests[i]`.
    pub async fn verify_all(
        &self,
        requests: &[RecordRequest],
        policy: &PolicyConfig,
        concurrency: usize,
    ) -> Vec<Verdict> {
        self.verify_stream(requests, policy, concurrency)
            .collect()
            .await
    }
}
