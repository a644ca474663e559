//! Tokyo Stock Explorer CLI: headless fetch, summarize, and config commands.
//!
//! Commands:
//! - `fetch`: fetch live data for every company and write tokyo_index.csv
//! - `summary`: per-company row counts and date ranges of an exported CSV
//! - `export`: re-read a CSV and write it back normalized (canonical header
//!   and number formatting; derived columns pass through unchanged)
//! - `config`: print the default market config as TOML (a starting point
//!   for a custom --config file)

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use tokyoview_core::data::{
    import_csv_file, load_live, CircuitBreaker, MarketConfig, StdoutProgress, YahooProvider,
};
use tokyoview_core::domain::Dataset;
use tokyoview_core::export::{to_csv_bytes, EXPORT_FILE_NAME};

#[derive(Parser)]
#[command(
    name = "tokyoview",
    about = "Tokyo Stock Explorer CLI: daily OHLCV fetch and export"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch live data for every company and write the export CSV.
    Fetch {
        /// Path to a market config TOML. Defaults to the built-in Tokyo list.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the window start date (YYYY-MM-DD).
        #[arg(long)]
        start: Option<String>,

        /// Override the window end date (YYYY-MM-DD).
        #[arg(long)]
        end: Option<String>,

        /// Output file. Defaults to tokyo_index.csv.
        #[arg(long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
    /// Summarize an exported CSV: rows and date range per company.
    Summary {
        /// CSV file to read. Defaults to tokyo_index.csv.
        #[arg(default_value = EXPORT_FILE_NAME)]
        file: PathBuf,
    },
    /// Re-read a CSV and write it back in the canonical export format.
    Export {
        /// CSV file to read. Defaults to tokyo_index.csv.
        #[arg(default_value = EXPORT_FILE_NAME)]
        file: PathBuf,

        /// Output file. Defaults to overwriting the input in place.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the default market config as TOML.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            config,
            start,
            end,
            out,
        } => run_fetch(config.as_deref(), start.as_deref(), end.as_deref(), &out),
        Commands::Summary { file } => run_summary(&file),
        Commands::Export { file, out } => run_export(&file, out.as_deref()),
        Commands::Config => run_config(),
    }
}

fn run_fetch(
    config_path: Option<&Path>,
    start: Option<&str>,
    end: Option<&str>,
    out: &Path,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => MarketConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!(e))
            .with_context(|| format!("loading config {}", path.display()))?,
        None => MarketConfig::default_tokyo(),
    };

    if let Some(s) = start {
        config.start = parse_date(s).with_context(|| format!("invalid --start {s}"))?;
    }
    if let Some(s) = end {
        config.end = parse_date(s).with_context(|| format!("invalid --end {s}"))?;
    }
    if config.start > config.end {
        bail!(
            "start date {} is after end date {}",
            config.start,
            config.end
        );
    }

    if config.companies.is_empty() {
        bail!("config lists no companies");
    }

    println!("Universe: {}", config.names().join(", "));

    let breaker = Arc::new(CircuitBreaker::default_provider());
    let provider = YahooProvider::new(breaker);
    let progress = StdoutProgress;

    let dataset = load_live(&config, &provider, &progress)?;

    let payload = to_csv_bytes(&dataset)?;
    std::fs::write(out, &payload).with_context(|| format!("writing {}", out.display()))?;

    println!(
        "Wrote {} ({} rows, {} bytes)",
        out.display(),
        dataset.len(),
        payload.len()
    );
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(Into::into)
}

fn run_summary(file: &Path) -> Result<()> {
    let dataset = import_csv_file(file)?;
    print_summary(file, &dataset);
    Ok(())
}

fn print_summary(file: &Path, dataset: &Dataset) {
    println!("File: {}", file.display());
    println!("Rows: {}", dataset.len());
    println!();
    println!("{:<22} {:>8} {:<12} {:<12}", "Company", "Rows", "First", "Last");
    println!("{}", "-".repeat(58));

    for symbol in dataset.symbols() {
        let rows = dataset.filter_symbol(symbol);
        let first = rows.iter().map(|r| r.date).min();
        let last = rows.iter().map(|r| r.date).max();
        let (first, last) = match (first, last) {
            (Some(f), Some(l)) => (f.to_string(), l.to_string()),
            _ => ("-".into(), "-".into()),
        };
        println!("{:<22} {:>8} {:<12} {:<12}", symbol, rows.len(), first, last);
    }
}

fn run_export(file: &Path, out: Option<&Path>) -> Result<()> {
    let dataset = import_csv_file(file)?;
    let out = out.unwrap_or(file);

    let payload = to_csv_bytes(&dataset)?;
    std::fs::write(out, &payload).with_context(|| format!("writing {}", out.display()))?;

    println!(
        "Wrote {} ({} rows, {} bytes)",
        out.display(),
        dataset.len(),
        payload.len()
    );
    Ok(())
}

fn run_config() -> Result<()> {
    let toml = MarketConfig::default_tokyo()
        .to_toml()
        .map_err(|e| anyhow::anyhow!(e))?;
    print!("{toml}");
    Ok(())
}
