//! CLI error types with miette diagnostics.
//!
//! Maps config, core and transport errors into user-facing errors with
//! actionable help text and a stable exit code.

use miette::Diagnostic;
use thiserror::Error;

use sendcheck_config::ConfigError;
use sendcheck_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
    pub const CHECKS_FAILED: i32 = 9;
    pub const INTERRUPTED: i32 = 130;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resolver ─────────────────────────────────────────────────────
    #[error("Could not reach the resolver at {endpoint}")]
    #[diagnostic(
        code(sendcheck::connection_failed),
        help(
            "Every lookup failed before an answer was read: {reason}\n\
             Check network access, or point --endpoint at another DoH JSON resolver."
        )
    )]
    ConnectionFailed { endpoint: String, reason: String },

    #[error("Could not set up TLS for the resolver connection")]
    #[diagnostic(
        code(sendcheck::tls_error),
        help("{reason}\nCheck resolver.ca_cert in your config file.")
    )]
    TlsError { reason: String },

    #[error("Resolver requests timed out after {seconds}s")]
    #[diagnostic(
        code(sendcheck::timeout),
        help("Increase the timeout with --timeout or check resolver responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Checks ───────────────────────────────────────────────────────
    #[error("{failed} of {total} records are not valid")]
    #[diagnostic(
        code(sendcheck::checks_failed),
        help("Reported because --strict is set.")
    )]
    ChecksFailed { failed: usize, total: usize },

    #[error("Interrupted")]
    #[diagnostic(code(sendcheck::interrupted))]
    Interrupted,

    // ── Input ────────────────────────────────────────────────────────
    #[error("Invalid domain {domain:?}")]
    #[diagnostic(
        code(sendcheck::invalid_domain),
        help("Pass a bare domain such as example.com.")
    )]
    InvalidDomain { domain: String },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sendcheck::validation))]
    Validation { field: String, reason: String },

    #[error("No records to check in {source_name}")]
    #[diagnostic(
        code(sendcheck::empty_batch),
        help(
            "CSV input needs a header row with sending_domain and host/record columns.\n\
             Tab-separated input needs at least 10 columns per line."
        )
    )]
    EmptyBatch { source_name: String },

    #[error("Could not parse CSV input: {0}")]
    #[diagnostic(code(sendcheck::csv))]
    Csv(#[from] csv::Error),

    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(sendcheck::config),
        help("Inspect the effective config with: sendcheck config show")
    )]
    Config(#[from] ConfigError),

    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(sendcheck::config_exists),
        help("Use --force or --yes to overwrite it.")
    )]
    ConfigExists { path: String },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Could not render output: {0}")]
    #[diagnostic(code(sendcheck::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::TlsError { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::ChecksFailed { .. } => exit_code::CHECKS_FAILED,
            Self::Interrupted => exit_code::INTERRUPTED,
            Self::InvalidDomain { .. }
            | Self::Validation { .. }
            | Self::EmptyBatch { .. }
            | Self::Csv(_) => exit_code::USAGE,
            Self::Config(_) | Self::ConfigExists { .. } => exit_code::CONFIG,
            Self::Io(_) | Self::Render(_) => exit_code::GENERAL,
        }
    }
}

// ── Upstream error mapping ───────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidDomain { domain } => CliError::InvalidDomain { domain },
            other => CliError::Validation {
                field: "input".into(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<sendcheck_api::Error> for CliError {
    fn from(err: sendcheck_api::Error) -> Self {
        match err {
            sendcheck_api::Error::Tls(reason) => CliError::TlsError { reason },
            sendcheck_api::Error::InvalidUrl(e) => CliError::Validation {
                field: "endpoint".into(),
                reason: e.to_string(),
            },
            other => CliError::ConnectionFailed {
                endpoint: "(resolver)".into(),
                reason: other.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Render(err.to_string())
    }
}
