//! Pipeline runner: wires together ingestion, cleaning, indicators,
//! validation, and the store.
//!
//! Entry points:
//! - `run()`: full run against the configured SQLite store. Used by the CLI.
//! - `run_with_sink()`: full run against any `TableSink`.
//! - `inspect()`: everything except the write.
//! - `process()`: the pure stages over an already-ingested table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockpipe_core::domain::{Cell, PriceSeries, RawTable};
use stockpipe_core::{
    validate, Cleaned, Cleaner, DataIntegrityError, IndicatorEngine, IndicatorSeries,
    MalformedDateError,
};

use crate::config::{ConfigError, PipelineConfig};
use crate::ingest::{read_csv, IngestError};
use crate::store::{SqliteStore, StoreError, TableSink};

/// Errors from any pipeline stage. None are recovered.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    MalformedDate(#[from] MalformedDateError),
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Current schema version for the serialized run summary.
pub const SCHEMA_VERSION: u32 = 1;

/// What one run did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub input: String,
    pub raw_rows: usize,
    pub dropped_missing: usize,
    pub dropped_outliers: usize,
    pub duplicate_dates: usize,
    pub cleaned_rows: usize,
    /// Rows after resampling; what a store write receives.
    pub indicator_rows: usize,
    /// Rows written, `None` when nothing was stored.
    pub stored_rows: Option<usize>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// BLAKE3 of the cleaned daily series.
    pub dataset_hash: String,
    pub table: String,
    pub destination: Option<String>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Output of the pure stages.
#[derive(Debug, Clone)]
pub struct Processed {
    pub cleaned: Cleaned,
    pub indicators: IndicatorSeries,
}

/// Clean, compute and validate an ingested table.
pub fn process(config: &PipelineConfig, table: RawTable) -> Result<Processed, PipelineError> {
    let cleaned = Cleaner::new(config.cleaning).clean(table)?;
    let indicators = IndicatorEngine::new(config.indicators).run(&cleaned.series);
    validate(&indicators)?;
    Ok(Processed {
        cleaned,
        indicators,
    })
}

/// Ingest, clean, compute and validate without writing anything.
pub fn inspect(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    config.validate()?;
    let table = read_csv(&config.input.path)?;
    let processed = process(config, table)?;
    Ok(summarize(config, &processed, None, None))
}

/// Full run against the SQLite store named in `config.store`.
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let store = SqliteStore::new(config.store.clone());
    run_with_sink(config, &store)
}

/// Full run, replacing the destination table of `sink`.
pub fn run_with_sink(
    config: &PipelineConfig,
    sink: &dyn TableSink,
) -> Result<RunSummary, PipelineError> {
    config.validate()?;
    tracing::info!(input = %config.input.path.display(), "pipeline started");

    let table = read_csv(&config.input.path)?;
    let processed = process(config, table)?;
    let stored = sink.replace(&processed.indicators)?;

    let summary = summarize(config, &processed, Some(stored), Some(sink.describe()));
    tracing::info!(
        cleaned = summary.cleaned_rows,
        stored,
        hash = %summary.dataset_hash,
        "pipeline finished"
    );
    Ok(summary)
}

fn summarize(
    config: &PipelineConfig,
    processed: &Processed,
    stored_rows: Option<usize>,
    destination: Option<String>,
) -> RunSummary {
    let report = &processed.cleaned.report;
    let series = &processed.cleaned.series;
    RunSummary {
        schema_version: SCHEMA_VERSION,
        input: config.input.path.display().to_string(),
        raw_rows: report.raw_rows,
        dropped_missing: report.dropped_missing.len(),
        dropped_outliers: report.dropped_outliers.len(),
        duplicate_dates: report.duplicate_dates,
        cleaned_rows: report.cleaned_rows,
        indicator_rows: processed.indicators.len(),
        stored_rows,
        first_date: series.first_date(),
        last_date: series.last_date(),
        dataset_hash: compute_dataset_hash(series),
        table: config.store.table.clone(),
        destination,
    }
}

/// Deterministic BLAKE3 hash over the cleaned daily series.
///
/// Covers passthrough column names, then per row the date, OHLC values and
/// passthrough cells.
pub fn compute_dataset_hash(series: &PriceSeries) -> String {
    let mut hasher = blake3::Hasher::new();
    for column in series.extra_columns() {
        hasher.update(column.name.as_bytes());
        hasher.update(&[0]);
    }
    for row in series.rows() {
        hasher.update(row.date.to_string().as_bytes());
        for value in row.prices() {
            hasher.update(&value.to_le_bytes());
        }
        for cell in &row.extra {
            match cell {
                Cell::Number(v) => hasher.update(&v.to_le_bytes()),
                Cell::Text(s) => hasher.update(s.as_bytes()),
            };
            hasher.update(&[0]);
        }
    }
    hasher.finalize().to_hex().to_string()
}
