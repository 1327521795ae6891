//! Command dispatch: bridges CLI args -> verifier -> output formatting.

pub mod check;
pub mod config_cmd;

use clap::CommandFactory;

use crate::cli::{Cli, Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Run one parsed subcommand.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        // Config and completions never touch the resolver
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "sendcheck", &mut std::io::stdout());
            Ok(())
        }

        Command::Domain(args) => {
            let cfg = config::load_effective(global)?;
            check::domain(args, &cfg, global).await
        }
        Command::Record(args) => {
            let cfg = config::load_effective(global)?;
            check::record(args, &cfg, global).await
        }
        Command::Batch(args) => {
            let cfg = config::load_effective(global)?;
            check::batch(args, &cfg, global).await
        }
    }
}
