use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::Shell;

// cli.rs only depends on clap, so it can be compiled into the build script
// to render man pages and completions at build time.
#[path = "src/cli.rs"]
mod cli;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir: PathBuf = std::env::var_os("OUT_DIR")
        .ok_or("OUT_DIR not set by Cargo")?
        .into();

    let mut cmd = cli::Cli::command();

    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir)?;
    render_manpages(&cmd, &man_dir)?;

    let completions_dir = out_dir.join("completions");
    fs::create_dir_all(&completions_dir)?;
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        clap_complete::generate_to(shell, &mut cmd, "sendcheck", &completions_dir)?;
    }

    Ok(())
}

/// One page per command, recursing into visible subcommands
/// (`sendcheck-config-init.1` and so on).
fn render_manpages(cmd: &clap::Command, dir: &Path) -> Result<(), Box<dyn Error>> {
    let name = cmd.get_name().to_owned();

    let mut page = Vec::new();
    clap_mangen::Man::new(cmd.clone()).render(&mut page)?;
    fs::write(dir.join(format!("{name}.1")), page)?;

    for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
        let sub = sub.clone().name(format!("{name}-{}", sub.get_name()));
        render_manpages(&sub, dir)?;
    }
    Ok(())
}
