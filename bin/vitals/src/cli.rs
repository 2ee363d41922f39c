//! Command-line interface for the vitals tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use vitals_score::VersionDecay;

/// Fleet vitality scoring and ranking.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) logs: LogArgs,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Score and rank a fleet snapshot, printing the report as JSON.
    Score(ScoreArgs),

    /// Print the default scoring configuration as TOML.
    Config,
}

/// Logging configuration.
#[derive(Debug, Args, Clone, Default)]
#[command(next_help_heading = "Logging")]
pub(crate) struct LogArgs {
    /// Silence all output.
    #[arg(short, long, global = true)]
    pub(crate) quiet: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub(crate) verbosity: u8,

    /// Log filter directive (e.g., "vitals_fleet=debug,vitals_score=trace").
    #[arg(long = "log.filter", value_name = "DIRECTIVE", global = true)]
    pub(crate) filter: Option<String>,

    /// Use JSON format for log output.
    #[arg(long = "log.json", global = true)]
    pub(crate) json: bool,
}

/// Arguments for the `score` command.
#[derive(Debug, Args)]
pub(crate) struct ScoreArgs {
    /// Fleet snapshot: a JSON node list, or an object with a `nodes` list.
    #[arg(long, value_name = "FILE")]
    pub(crate) snapshot: PathBuf,

    /// Scoring configuration file (TOML). Defaults apply when omitted.
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Version decay table, overriding the one in the config file.
    #[arg(long, value_enum, value_name = "TABLE")]
    pub(crate) decay: Option<DecayTable>,

    /// Treat the credits source as unreachable for this run.
    #[arg(long)]
    pub(crate) credits_offline: bool,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pub(crate) pretty: bool,

    /// Write the report here instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub(crate) output: Option<PathBuf>,
}

/// Named version decay presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum DecayTable {
    /// 90, 70, 50, 30, 10, then one point per further release.
    Reference,
    /// 80, 50, then nothing.
    TwoStrikes,
}

impl From<DecayTable> for VersionDecay {
    fn from(table: DecayTable) -> Self {
        match table {
            DecayTable::Reference => Self::reference(),
            DecayTable::TwoStrikes => Self::two_strikes(),
        }
    }
}
