//! Configuration for sendcheck.
//!
//! Layered loading (built-in defaults, TOML file, `SENDCHECK_` environment),
//! validation, and translation into the types `sendcheck-core` and
//! `sendcheck-api` consume. The core never reads files itself; the CLI hands
//! it a ready `PolicyConfig` and `TransportConfig` built here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use sendcheck_api::{DEFAULT_ENDPOINT, TlsMode, TransportConfig};
use sendcheck_core::{DEFAULT_CONCURRENCY, DomainConventions, PolicyConfig, interpret::parse_mx};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverSettings,

    /// Host naming used when expanding a bare domain.
    #[serde(default)]
    pub conventions: DomainConventions,

    /// Matching rules per record kind.
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolverSettings {
    /// DNS-over-HTTPS JSON endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Maximum checks in flight during a batch.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Extra CA certificate (PEM) to trust for the endpoint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout: default_timeout(),
            concurrency: default_concurrency(),
            ca_cert: None,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.into()
}
fn default_timeout() -> u64 {
    10
}
fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

impl Config {
    /// Check every invariant the verifier relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_url()?;

        if self.resolver.timeout == 0 {
            return Err(invalid("resolver.timeout", "must be greater than 0"));
        }
        if self.resolver.concurrency == 0 {
            return Err(invalid("resolver.concurrency", "must be greater than 0"));
        }

        if self.policy.spf.valid_all_modifiers.is_empty() {
            return Err(invalid(
                "policy.spf.valid_all_modifiers",
                "at least one modifier is required",
            ));
        }
        for record in &self.policy.mx.required_records {
            parse_mx(record).map_err(|_| {
                invalid(
                    "policy.mx.required_records",
                    format!("expected 'priority host', got '{record}'"),
                )
            })?;
        }

        let conventions = [
            ("conventions.dkim_selector", &self.conventions.dkim_selector),
            ("conventions.cname_prefix", &self.conventions.cname_prefix),
            ("conventions.cname_target", &self.conventions.cname_target),
        ];
        for (field, value) in conventions {
            if value.trim().is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
        }

        Ok(())
    }

    /// The resolver endpoint as an http(s) URL.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let url: Url = self
            .resolver
            .endpoint
            .parse()
            .map_err(|_| invalid("resolver.endpoint", format!("invalid URL: {}", self.resolver.endpoint)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(
                "resolver.endpoint",
                format!("expected an http or https URL, got scheme '{other}'"),
            )),
        }
    }

    /// Transport settings for the DoH client.
    pub fn transport_config(&self) -> TransportConfig {
        let tls = self
            .resolver
            .ca_cert
            .clone()
            .map_or(TlsMode::System, TlsMode::CustomCa);

        TransportConfig {
            tls,
            ..TransportConfig::default()
        }
        .with_timeout(Duration::from_secs(self.resolver.timeout))
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "sendcheck", "sendcheck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sendcheck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load and validate the config from `path` (or the platform default)
/// layered with `SENDCHECK_` environment variables.
///
/// A missing file is not an error; defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(config_path, Path::to_path_buf);
    load_config_from(&path)
}

/// Load and validate the config from an explicit file path.
///
/// Nested keys are addressed with `__`, e.g. `SENDCHECK_RESOLVER__TIMEOUT=5`
/// or `SENDCHECK_POLICY__MX__REQUIRE_EXACT_MATCH=false`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SENDCHECK_").split("__"));

    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to pretty TOML at `path`, creating parent directories.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_toml(cfg)?)?;
    Ok(())
}

/// Render config as pretty TOML.
pub fn to_toml(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.resolver.endpoint, "https://cloudflare-dns.com/dns-query");
        assert_eq!(cfg.resolver.timeout, 10);
        assert_eq!(cfg.resolver.concurrency, 8);
    }

    #[test]
    fn save_then_load_round_trips() {
        figment::Jail::expect_with(|jail| {
            let path = jail.directory().join("nested").join("config.toml");

            let mut cfg = Config::default();
            cfg.resolver.timeout = 3;
            cfg.policy.spf.required_includes = vec!["include:other.net".into()];
            save_config_to(&cfg, &path).unwrap();

            let loaded = load_config_from(&path).unwrap();
            assert_eq!(loaded, cfg);
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        figment::Jail::expect_with(|_jail| {
            let loaded = load_config_from(Path::new("absent.toml")).unwrap();
            assert_eq!(loaded, Config::default());
            Ok(())
        });
    }

    #[test]
    fn to_toml_writes_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        save_config_to(&Config::default(), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("[resolver]"));
        assert!(text.contains("[policy.spf]"));
        assert!(text.contains("include:_spf.cordialmail.net"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                [resolver]
                endpoint = "https://dns.google/resolve"

                [policy.mx]
                require_exact_match = false
                "#,
            )?;

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.resolver.endpoint, "https://dns.google/resolve");
            assert_eq!(cfg.resolver.timeout, 10);
            assert!(!cfg.policy.mx.require_exact_match);
            assert_eq!(cfg.policy.mx.required_records.len(), 2);
            assert_eq!(cfg.conventions, DomainConventions::default());
            Ok(())
        });
    }

    #[test]
    fn environment_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[resolver]\ntimeout = 20\n")?;
            jail.set_env("SENDCHECK_RESOLVER__TIMEOUT", "4");
            jail.set_env("SENDCHECK_CONVENTIONS__DKIM_SELECTOR", "s2");

            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.resolver.timeout, 4);
            assert_eq!(cfg.conventions.dkim_selector, "s2");
            Ok(())
        });
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let mut cfg = Config::default();
        cfg.resolver.endpoint = "ftp://dns.example".into();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().starts_with("invalid resolver.endpoint"), "{err}");

        cfg.resolver.endpoint = "not a url".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_limits() {
        let mut cfg = Config::default();
        cfg.resolver.concurrency = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.resolver.timeout = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_policy_lists() {
        let mut cfg = Config::default();
        cfg.policy.spf.valid_all_modifiers.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = Config::default();
        cfg.policy.mx.required_records = vec!["mxa.mailgun.org".into()];
        let err = cfg.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid policy.mx.required_records: expected 'priority host', got 'mxa.mailgun.org'"
        );

        let mut cfg = Config::default();
        cfg.conventions.cname_target = "  ".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn transport_uses_timeout_and_ca() {
        let mut cfg = Config::default();
        cfg.resolver.timeout = 7;
        cfg.resolver.ca_cert = Some(PathBuf::from("/etc/ssl/corp.pem"));

        let transport = cfg.transport_config();
        assert_eq!(transport.timeout, Duration::from_secs(7));
        assert_eq!(transport.tls, TlsMode::CustomCa(PathBuf::from("/etc/ssl/corp.pem")));
    }
}
