use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Per-year EV share trend with a latest-year market summary
    Trend(TrendArgs),
    /// Rank states by the EV Readiness Index
    Readiness(ReadinessArgs),
    /// Fit a linear share trend and predict future years
    Forecast(ForecastArgs),
    /// Market-structure drivers and policy-support comparison
    Drivers(DriversArgs),
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

/// Output format for tabular/structured data.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable aligned table (default for interactive use)
    #[default]
    Table,
    /// JSON (pipe-friendly, structured)
    Json,
    /// Comma-separated values (pipe to awk/cut/etc)
    Csv,
}

#[derive(Args, Debug)]
pub struct TrendArgs {
    /// Path to the registration CSV
    #[arg(long)]
    pub csv: PathBuf,

    /// Restrict the view to a single state
    #[arg(long)]
    pub state: Option<String>,

    /// Restrict the view to vehicle segments (repeatable)
    #[arg(long = "segment")]
    pub segments: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the result as JSON and record a run manifest beside it
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReadinessArgs {
    /// Path to the registration CSV
    #[arg(long)]
    pub csv: PathBuf,

    /// Restrict the view to vehicle segments (repeatable)
    #[arg(long = "segment")]
    pub segments: Vec<String>,

    /// Score weights as `penetration,momentum` or
    /// `penetration,momentum,policy`; must sum to 1
    #[arg(long)]
    pub weights: Option<String>,

    /// Policy incentives CSV; enables three-factor scoring
    #[arg(long)]
    pub policy_csv: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the result as JSON and record a run manifest beside it
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// Path to the registration CSV
    #[arg(long)]
    pub csv: PathBuf,

    /// Forecast one state instead of the national total
    #[arg(long)]
    pub state: Option<String>,

    /// Restrict the view to vehicle segments (repeatable)
    #[arg(long = "segment")]
    pub segments: Vec<String>,

    /// Target year to predict
    #[arg(long)]
    pub year: i32,

    /// Predict this many additional years after the target
    #[arg(long, default_value_t = 0)]
    pub horizon: u32,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the result as JSON and record a run manifest beside it
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DriversArgs {
    /// Path to the registration CSV
    #[arg(long)]
    pub csv: PathBuf,

    /// Restrict the view to vehicle segments (repeatable)
    #[arg(long = "segment")]
    pub segments: Vec<String>,

    /// Policy incentives CSV for the support-vs-adoption comparison
    #[arg(long)]
    pub policy_csv: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Write the result as JSON and record a run manifest beside it
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
