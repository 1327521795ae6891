use thiserror::Error;

/// Top-level error type for the `sendcheck-api` crate.
///
/// Covers every way a DNS-over-HTTPS lookup can fail: transport, upstream
/// HTTP status, and body decoding. "No records" is never an
/// error here -- an empty answer list is a successful lookup.
/// `sendcheck-core` maps these into verification failures.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Resolver ────────────────────────────────────────────────────
    /// The resolver answered with a non-success HTTP status.
    #[error("DNS query failed: HTTP {status} {reason}")]
    Http { status: u16, reason: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Malformed resolver response: {message}")]
    Deserialization { message: String, body: String },
}
