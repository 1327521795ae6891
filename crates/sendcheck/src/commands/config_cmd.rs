//! Config subcommand handlers.

use std::io::IsTerminal;

use sendcheck_config::{Config, save_config_to, to_toml};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_file(global);

    match args.command {
        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), false);
        }

        ConfigCommand::Show => {
            let cfg = config::load_effective(global)?;
            output::print_output(to_toml(&cfg)?.trim_end(), false);
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                let prompt = format!("Overwrite existing config at {}?", path.display());
                if !confirm(&prompt, global.yes)? {
                    return Err(CliError::ConfigExists {
                        path: path.display().to_string(),
                    });
                }
            }
            save_config_to(&Config::default(), &path)?;
            if !global.quiet {
                eprintln!("Wrote default config to {}", path.display());
            }
        }
    }
    Ok(())
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
/// Declines when stdin is not a terminal.
fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
