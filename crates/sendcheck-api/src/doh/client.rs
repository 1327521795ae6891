// DoH HTTP client
//
// Wraps `reqwest::Client` with query construction for the JSON DoH API,
// status checking, and answer normalization. One call is one HTTP round
// trip: there is no caching, retrying, or batching at this layer.

use reqwest::header::ACCEPT;
use tracing::debug;
use url::Url;

use crate::doh::models::{DnsResponse, QueryKind, rcode};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Cloudflare's public JSON resolver.
pub const DEFAULT_ENDPOINT: &str = "https://cloudflare-dns.com/dns-query";

const DNS_JSON: &str = "application/dns-json";

/// HTTP client for a DNS-over-HTTPS JSON endpoint.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct DohClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl DohClient {
    /// Create a client for `endpoint` using the given transport settings.
    pub fn new(endpoint: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, endpoint })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    /// Parse `endpoint` and wrap an existing `reqwest::Client`.
    pub fn from_reqwest(endpoint: &str, http: reqwest::Client) -> Result<Self, Error> {
        let endpoint = Url::parse(endpoint)?;
        Ok(Self::with_client(http, endpoint))
    }

    /// The resolver endpoint.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{endpoint}?name={name}&type={kind}`, preserving any query the
    /// endpoint already carries.
    pub(crate) fn query_url(&self, name: &str, kind: QueryKind) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("type", <&'static str>::from(kind));
        url
    }

    // ── Requests ─────────────────────────────────────────────────────

    /// Send one query and decode the full DoH response.
    ///
    /// Fails on transport errors, non-2xx statuses, and undecodable bodies.
    /// The DNS response code is returned as-is for the caller to inspect.
    pub async fn query(&self, name: &str, kind: QueryKind) -> Result<DnsResponse, Error> {
        let url = self.query_url(name, kind);
        debug!(%url, "GET");

        let resp = self
            .http
            .get(url)
            .header(ACCEPT, DNS_JSON)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").into(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    /// Resolve `name` and return the raw `data` strings of every answer of
    /// the requested type, in resolver order.
    ///
    /// An empty vector means the name has no such records. A response
    /// without an `Answer` section counts as empty whatever its DNS
    /// response code (NXDOMAIN, SERVFAIL, ...); only transport, HTTP status
    /// and decoding failures are errors.
    pub async fn resolve(&self, name: &str, kind: QueryKind) -> Result<Vec<String>, Error> {
        let response = self.query(name, kind).await?;

        if response.status != rcode::NOERROR {
            debug!(
                name,
                %kind,
                rcode = %rcode::name(response.status),
                "resolver returned a non-zero response code"
            );
        }
        if response.truncated {
            debug!(name, %kind, "resolver flagged the response as truncated");
        }

        let answers: Vec<String> = response
            .answers_for(kind)
            .map(|a| a.data.clone())
            .collect();

        debug!(name, %kind, count = answers.len(), "resolved");
        Ok(answers)
    }
}
