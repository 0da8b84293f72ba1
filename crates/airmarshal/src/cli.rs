//! Clap derive structures for the `airmarshal` CLI.
//!
//! Also compiled by `build.rs` for man page generation, so this module may
//! only depend on clap, clap_complete and humantime.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default `--timespan`: one week, in seconds.
pub const DEFAULT_TIMESPAN: &str = "604800";

// ── Top-Level CLI ────────────────────────────────────────────────────

/// airmarshal -- search Meraki Air Marshal data and spot Apple TVs
#[derive(Debug, Parser)]
#[command(
    name = "airmarshal",
    version,
    about = "Search Meraki Air Marshal data for SSIDs and spot Apple TVs",
    long_about = "Walks the first organization visible to a Meraki Dashboard API key,\n\
        visits each wireless network, and reports either Air Marshal SSIDs\n\
        matching a regular expression or clients that look like Apple TVs.\n\n\
        Matches are printed as comma-separated records as they are found.",
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
    /// Dashboard API key (default: $MERAKI_DASHBOARD_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Dashboard API base URL (default: $MERAKI_DASHBOARD_BASE_URL or the public API)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds (default: 30)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Attempts for the per-device clients request, including the first (default: 5)
    #[arg(long, global = true)]
    pub retry_attempts: Option<u32>,

    /// Output format
    #[arg(long, short = 'o', default_value = "csv", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress report output (errors are still printed)
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated records, no header, streamed (default)
    Csv,
    /// Pretty table
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report Air Marshal SSIDs matching a regular expression
    #[command(alias = "ssid")]
    Ssids(SsidsArgs),

    /// Report wireless clients that look like Apple TVs
    #[command(alias = "atv")]
    AppleTvs(AppleTvsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct SsidsArgs {
    /// Regular expression matched case-insensitively anywhere in the SSID
    pub pattern: String,

    #[command(flatten)]
    pub window: WindowArgs,
}

#[derive(Debug, Args)]
pub struct AppleTvsArgs {
    #[command(flatten)]
    pub window: WindowArgs,
}

/// Look-back window shared by both searches.
#[derive(Debug, Args)]
pub struct WindowArgs {
    /// Look-back window, in seconds or as a duration like "7d" (max 31 days)
    #[arg(
        long,
        short = 't',
        default_value = DEFAULT_TIMESPAN,
        value_parser = parse_timespan
    )]
    pub timespan: u64,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

/// Plain seconds, or anything `humantime` understands.
fn parse_timespan(s: &str) -> Result<u64, String> {
    if let Ok(secs) = s.parse::<u64>() {
        return Ok(secs);
    }
    humantime::parse_duration(s)
        .map(|d: Duration| d.as_secs())
        .map_err(|e| format!("expected seconds or a duration like '7d': {e}"))
}
