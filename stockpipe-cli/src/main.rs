//! stockpipe CLI: run the price pipeline and inspect its configuration.
//!
//! Commands:
//! - `run`: ingest, clean, compute indicators, validate, replace the table
//! - `inspect`: everything `run` does except the write
//! - `show-config`: print the effective configuration (password redacted)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use stockpipe_runner::{inspect, run, PipelineConfig, RunSummary};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stockpipe",
    about = "stockpipe: OHLC cleaning, indicators and storage"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and replace the stored table.
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Directory holding the SQLite database (overrides store.host).
        #[arg(long)]
        db_dir: Option<PathBuf>,

        /// Print the run summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Clean, compute and validate without writing.
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the run summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the effective configuration as TOML.
    ShowConfig {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input CSV (overrides input.path).
    #[arg(long)]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stockpipe=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { source, db_dir, json } => {
            let mut config = load_config(source.config)?;
            if let Some(input) = source.input {
                config.input.path = input;
            }
            if let Some(dir) = db_dir {
                config.store.host = dir.to_string_lossy().into_owned();
            }
            tracing::debug!(store = ?config.store, "store configuration");
            let summary = run(&config).context("pipeline run failed")?;
            report(&summary, json)
        }
        Commands::Inspect { source, json } => {
            let mut config = load_config(source.config)?;
            if let Some(input) = source.input {
                config.input.path = input;
            }
            let summary = inspect(&config).context("inspection failed")?;
            report(&summary, json)
        }
        Commands::ShowConfig { config } => {
            let config = load_config(config)?;
            print!("{}", config.to_toml_redacted()?);
            Ok(())
        }
    }
}

fn load_config(path: Option<PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(PipelineConfig::default()),
    }
}

fn report(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print_summary(summary);
    }
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    let date = |d: Option<chrono::NaiveDate>| d.map_or_else(|| "-".to_string(), |d| d.to_string());

    println!("=== stockpipe run ===");
    println!("Input:            {}", summary.input);
    println!("Raw rows:         {}", summary.raw_rows);
    println!("Dropped missing:  {}", summary.dropped_missing);
    println!("Dropped outliers: {}", summary.dropped_outliers);
    println!("Duplicate dates:  {}", summary.duplicate_dates);
    println!("Cleaned rows:     {}", summary.cleaned_rows);
    println!(
        "Date range:       {} to {}",
        date(summary.first_date),
        date(summary.last_date)
    );
    println!("Indicator rows:   {}", summary.indicator_rows);
    match (&summary.destination, summary.stored_rows) {
        (Some(dest), Some(rows)) => println!("Stored:           {rows} rows in {dest}"),
        _ => println!("Stored:           nothing (inspect)"),
    }
    println!("Dataset hash:     {}", summary.dataset_hash);
}
