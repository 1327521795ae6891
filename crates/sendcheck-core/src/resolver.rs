// ── Resolver seam ──
//
// The verifier only needs "give me the raw answers for this name and type".
// `DohClient` is the production implementation; tests plug in fakes.

use std::future::Future;

use sendcheck_api::DohClient;

use crate::error::CoreError;
use crate::model::QueryKind;

/// Anything that can resolve a name to raw answer strings.
///
/// An empty vector means "no such records"; failures are errors.
pub trait Resolve: Sync {
    fn resolve(
        &self,
        name: &str,
        kind: QueryKind,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;
}

impl Resolve for DohClient {
    async fn resolve(&self, name: &str, kind: QueryKind) -> Result<Vec<String>, CoreError> {
        Ok(DohClient::resolve(self, name, kind).await?)
    }
}
