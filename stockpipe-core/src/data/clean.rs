//! The Cleaner: RawTable in, date-keyed PriceSeries out.
//!
//! Steps, in order:
//! 1. Drop every row with a missing cell (required or passthrough).
//! 2. Z-score filter on Open/High/Low/Close over the surviving rows.
//! 3. Parse `Date` strictly; any unparseable value aborts the run.
//! 4. Sort ascending and drop repeated dates (first occurrence wins).

use serde::{Deserialize, Serialize};

use super::canonicalize::Canonicalizer;
use super::dates::{parse_date, MalformedDateError};
use super::zscore::zscore_keep_mask;
use crate::domain::{Cell, PriceRow, PriceSeries, RawRow, RawTable};

/// Cleaner settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Rows with any price |z| at or above this value are rejected.
    pub z_threshold: f64,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self { z_threshold: 3.0 }
    }
}

/// Diagnostics gathered while cleaning. Never affects the outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanReport {
    pub raw_rows: usize,
    pub missing_before: Vec<(String, usize)>,
    pub missing_after: Vec<(String, usize)>,
    /// Source row numbers dropped for missing values.
    pub dropped_missing: Vec<usize>,
    /// Source row numbers rejected as outliers.
    pub dropped_outliers: Vec<usize>,
    pub duplicate_dates: usize,
    pub cleaned_rows: usize,
}

/// Output of a successful clean.
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub series: PriceSeries,
    pub report: CleanReport,
}

/// A row with every cell present, date still unparsed.
struct CompleteRow {
    line: usize,
    date: String,
    prices: [f64; 4],
    extra: Vec<Cell>,
}

impl CompleteRow {
    fn from_raw(row: RawRow) -> Option<Self> {
        Some(Self {
            line: row.line,
            date: row.date?,
            prices: [row.open?, row.high?, row.low?, row.close?],
            extra: row.extra.into_iter().collect::<Option<Vec<Cell>>>()?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    config: CleaningConfig,
}

impl Cleaner {
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    pub fn clean(&self, table: RawTable) -> Result<Cleaned, MalformedDateError> {
        let mut report = CleanReport {
            raw_rows: table.len(),
            missing_before: table.missing_counts(),
            ..CleanReport::default()
        };
        tracing::info!(missing = ?report.missing_before, "missing values before cleaning");
        let RawTable {
            extra_columns,
            rows,
        } = table;

        // Step A: drop incomplete rows
        let mut complete = Vec::with_capacity(rows.len());
        for row in rows {
            if !row.is_complete() {
                tracing::debug!(
                    line = row.line,
                    missing = ?row.missing_columns(&extra_columns),
                    "dropping row with missing values"
                );
                report.dropped_missing.push(row.line);
                continue;
            }
            complete.extend(CompleteRow::from_raw(row));
        }
        report.missing_after = report
            .missing_before
            .iter()
            .map(|(name, _)| (name.clone(), 0))
            .collect();
        tracing::info!(
            dropped = report.dropped_missing.len(),
            rows = ?report.dropped_missing,
            "rows with missing values removed"
        );

        // Step B: z-score outlier rejection
        let prices: Vec<[f64; 4]> = complete.iter().map(|r| r.prices).collect();
        let keep = zscore_keep_mask(&prices, self.config.z_threshold);
        let mut survivors = Vec::with_capacity(complete.len());
        for (row, kept) in complete.into_iter().zip(keep) {
            if kept {
                survivors.push(row);
            } else {
                tracing::debug!(line = row.line, prices = ?row.prices, "rejecting outlier row");
                report.dropped_outliers.push(row.line);
            }
        }
        tracing::info!(
            rejected = report.dropped_outliers.len(),
            threshold = self.config.z_threshold,
            "outlier rows removed"
        );

        // Step C: strict date parsing
        let mut parsed = Vec::with_capacity(survivors.len());
        for row in survivors {
            let date = parse_date(&row.date).ok_or_else(|| MalformedDateError {
                line: row.line,
                value: row.date.clone(),
            })?;
            let [open, high, low, close] = row.prices;
            parsed.push(PriceRow {
                date,
                open,
                high,
                low,
                close,
                extra: row.extra,
            });
        }

        // Step D: canonical order
        let (rows, duplicates) = Canonicalizer::canonicalize(parsed);
        if !duplicates.is_empty() {
            tracing::warn!(
                count = duplicates.len(),
                dates = ?duplicates,
                "dropped duplicate dates"
            );
        }
        report.duplicate_dates = duplicates.len();
        report.cleaned_rows = rows.len();

        Ok(Cleaned {
            series: PriceSeries::from_canonical(extra_columns, rows),
            report,
        })
    }
}

/// Clean with default settings.
pub fn clean(table: RawTable) -> Result<PriceSeries, MalformedDateError> {
    Cleaner::default().clean(table).map(|c| c.series)
}
