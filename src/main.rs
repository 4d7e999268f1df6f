mod aggregate;
mod cli;
mod config;
mod error;
mod feedback;
mod report;
mod score;
mod summary;
mod trend;
mod types;

use crate::error::{AuditError, Result};
use crate::types::config::SiteConfig;
use crate::types::report::{Severity, SiteAggregate};
use crate::types::signals::SignalRecord;
use chrono::Utc;
use clap::Parser;
use std::path::Path;
use tracing::info;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn load_signals(path: &Path) -> Result<Vec<SignalRecord>> {
    if !path.exists() {
        return Err(AuditError::SignalsNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AuditError::SignalsParse(format!("{}: {}", path.display(), e)))
}

fn load_aggregate(path: &Path) -> Result<SiteAggregate> {
    if !path.exists() {
        return Err(AuditError::PathNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| AuditError::BaselineParse(format!("{}: {}", path.display(), e)))
}

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        cli::Commands::Audit(cmd) => {
            let records = load_signals(&cmd.signals)?;
            let cwd = std::env::current_dir()?;
            let loaded = config::load_config(&cwd)?;
            let cfg = loaded.unwrap_or_else(SiteConfig::default);

            let now = Utc::now();
            info!(pages = records.len(), "scoring signal records");
            let pages = score::score_pages(&records, now);
            let site = aggregate::aggregate(&pages, &cfg.category_weights());

            let comparison = match &cmd.baseline {
                Some(path) => Some(trend::compare(&load_aggregate(path)?, &site)),
                None => None,
            };

            let prioritized = feedback::prioritize(&pages);
            let top = cmd.top.unwrap_or_else(|| cfg.top_findings());
            let executive = summary::build_summary(&site, &prioritized, comparison, now, top);

            let format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
                cli::ReportFormat::Csv => report::OutputFormat::Csv,
            };
            let rendered = report::render(&executive, &pages, format)?;
            println!("{rendered}");

            if let Some(path) = &cmd.save_aggregate {
                std::fs::write(path, serde_json::to_string_pretty(&site)?)?;
                info!(path = %path.display(), "saved aggregate");
            }

            let has_blocking = prioritized
                .ranked()
                .iter()
                .any(|issue| issue.severity == Severity::Critical);
            let has_warnings = prioritized
                .ranked()
                .iter()
                .any(|issue| issue.severity == Severity::Serious);

            if has_blocking {
                Ok(exit_code::BLOCKING)
            } else if has_warnings {
                Ok(exit_code::WARNINGS)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Compare(cmd) => {
            let previous = load_aggregate(&cmd.previous)?;
            let current = load_aggregate(&cmd.current)?;
            let deltas = trend::compare(&previous, &current);

            if deltas.is_empty() {
                println!("compare: no shared metrics");
                return Ok(exit_code::SUCCESS);
            }

            println!("{:<40} {:>10} {:>10} {:>10} {:>9}", "metric", "previous", "current", "delta", "change");
            for delta in &deltas {
                println!(
                    "{:<40} {:>10.2} {:>10.2} {:>+10.2} {:>+8.1}%",
                    delta.metric, delta.previous, delta.current, delta.delta, delta.percent_change
                );
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Pages(cmd) => {
            let records = load_signals(&cmd.signals)?;
            let pages = score::score_pages(&records, Utc::now());

            let rendered = match cmd.format {
                cli::PageFormat::Md => report::md::pages_markdown(&pages),
                cli::PageFormat::Csv => report::csv::pages_csv(&pages)?,
            };
            println!("{rendered}");
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
