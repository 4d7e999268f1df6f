use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sitegauge",
    version,
    about = "Website audit scoring and prioritized remediation reports"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a signals file and print the executive summary
    Audit(AuditCommand),
    /// Compare two persisted site aggregates
    Compare(CompareCommand),
    /// Print the per-page score table for a signals file
    Pages(PagesCommand),
}

#[derive(Args)]
pub struct AuditCommand {
    /// JSON file of per-page signal records produced by the extractor
    pub signals: PathBuf,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,

    /// Previous run's aggregate, enables the trend comparison block
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    /// Persist this run's aggregate for use as a future baseline
    #[arg(long)]
    pub save_aggregate: Option<PathBuf>,

    /// Cap on key findings in the summary (overrides config)
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Args)]
pub struct CompareCommand {
    pub previous: PathBuf,
    pub current: PathBuf,
}

#[derive(Args)]
pub struct PagesCommand {
    /// JSON file of per-page signal records produced by the extractor
    pub signals: PathBuf,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: PageFormat,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Csv,
}

#[derive(Clone, ValueEnum)]
pub enum PageFormat {
    Md,
    Csv,
}
