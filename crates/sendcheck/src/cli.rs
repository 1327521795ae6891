//! Clap derive structures for the `sendcheck` CLI.
//!
//! Kept free of workspace crates so `build.rs` can include it directly.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sendcheck -- verify email-authentication DNS records
#[derive(Debug, Parser)]
#[command(
    name = "sendcheck",
    version,
    about = "Verify SPF, DKIM, DMARC, CNAME and MX records for sending domains",
    long_about = "Checks a sending domain's SPF, DKIM, DMARC, CNAME and MX records against\n\
        the provider policy or against expected values supplied per record.\n\n\
        Lookups go through a DNS-over-HTTPS JSON resolver (Cloudflare by default).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "SENDCHECK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// DNS-over-HTTPS JSON endpoint (overrides config)
    #[arg(long, short = 'e', env = "SENDCHECK_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Resolver request timeout in seconds (overrides config)
    #[arg(long, env = "SENDCHECK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Maximum checks in flight (overrides config)
    #[arg(long, short = 'j', env = "SENDCHECK_CONCURRENCY", global = true)]
    pub concurrency: Option<usize>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SENDCHECK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, env = "SENDCHECK_COLOR", default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Exit with status 9 unless every record is valid
    #[arg(long, env = "SENDCHECK_STRICT", global = true)]
    pub strict: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one record per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the five standard records of one or more sending domains
    #[command(alias = "d")]
    Domain(DomainArgs),

    /// Check a single record
    #[command(alias = "r")]
    Record(RecordArgs),

    /// Check records listed in a CSV or tab-separated file
    #[command(alias = "b")]
    Batch(BatchArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Check commands ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DomainArgs {
    /// Sending domains, e.g. example.com
    #[arg(required = true, num_args = 1..)]
    pub domains: Vec<String>,
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Record kind
    #[arg(value_enum, ignore_case = true)]
    pub kind: RecordKindArg,

    /// DNS name to query, e.g. _dmarc.example.com
    pub name: String,

    /// Expected record value (MX: one `priority host` per line)
    #[arg(long, short = 'x')]
    pub expected: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RecordKindArg {
    Spf,
    Dkim,
    Dmarc,
    Cname,
    Mx,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Input file, or `-` for stdin
    pub file: PathBuf,

    /// Input format
    #[arg(long, short = 'f', default_value = "auto")]
    pub format: BatchFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BatchFormat {
    /// CSV for `.csv` files or a `sending_domain` header, TSV otherwise
    Auto,
    /// Comma-separated with a header row
    Csv,
    /// Tab-separated, fixed column positions
    Tsv,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Print the effective configuration as TOML
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
