//! GlobalOpts-aware wrappers around `sendcheck-config`.

use std::path::PathBuf;

use sendcheck_config::{Config, config_path, load_config};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The config file this invocation reads and writes.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load the config and apply `--endpoint`, `--timeout` and `--concurrency`.
pub fn load_effective(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config(global.config.as_deref())?;

    if let Some(ref endpoint) = global.endpoint {
        cfg.resolver.endpoint.clone_from(endpoint);
    }
    if let Some(timeout) = global.timeout {
        cfg.resolver.timeout = timeout;
    }
    if let Some(concurrency) = global.concurrency {
        cfg.resolver.concurrency = concurrency;
    }

    cfg.validate()?;
    Ok(cfg)
}
