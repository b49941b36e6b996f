//! RawTable: ingested rows before cleaning. Every cell may be missing.

use super::price::{Cell, ExtraColumn, PriceSeries};
use super::{DATE_COLUMN, PRICE_COLUMNS};

/// One input record as read from the source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    /// 1-based data record number in the source file (header excluded).
    pub line: usize,
    pub date: Option<String>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub extra: Vec<Option<Cell>>,
}

impl RawRow {
    /// True when every required and passthrough cell is present.
    pub fn is_complete(&self) -> bool {
        self.date.is_some()
            && self.open.is_some()
            && self.high.is_some()
            && self.low.is_some()
            && self.close.is_some()
            && self.extra.iter().all(Option::is_some)
    }

    /// Names of the columns whose value is missing in this row.
    pub fn missing_columns<'a>(&self, extra_columns: &'a [ExtraColumn]) -> Vec<&'a str> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push(DATE_COLUMN);
        }
        for (name, value) in PRICE_COLUMNS.iter().zip(self.prices()) {
            if value.is_none() {
                missing.push(*name);
            }
        }
        for (column, cell) in extra_columns.iter().zip(&self.extra) {
            if cell.is_none() {
                missing.push(column.name.as_str());
            }
        }
        missing
    }

    fn prices(&self) -> [Option<f64>; 4] {
        [self.open, self.high, self.low, self.close]
    }
}

/// Header-driven in-memory table produced by ingestion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub extra_columns: Vec<ExtraColumn>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(extra_columns: Vec<ExtraColumn>, rows: Vec<RawRow>) -> Self {
        Self {
            extra_columns,
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All column names: date, OHLC, then passthrough columns in header order.
    pub fn column_names(&self) -> Vec<&str> {
        std::iter::once(DATE_COLUMN)
            .chain(PRICE_COLUMNS)
            .chain(self.extra_columns.iter().map(|c| c.name.as_str()))
            .collect()
    }

    /// Missing-value count per column, in `column_names()` order.
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        let width = 5 + self.extra_columns.len();
        let mut counts = vec![0usize; width];
        for row in &self.rows {
            if row.date.is_none() {
                counts[0] += 1;
            }
            for (i, value) in row.prices().iter().enumerate() {
                if value.is_none() {
                    counts[1 + i] += 1;
                }
            }
            for (i, cell) in row.extra.iter().enumerate().take(self.extra_columns.len()) {
                if cell.is_none() {
                    counts[5 + i] += 1;
                }
            }
        }
        self.column_names()
            .into_iter()
            .map(String::from)
            .zip(counts)
            .collect()
    }
}

impl From<&PriceSeries> for RawTable {
    fn from(series: &PriceSeries) -> Self {
        let rows = series
            .rows()
            .iter()
            .enumerate()
            .map(|(i, row)| RawRow {
                line: i + 1,
                date: Some(row.date.format("%Y-%m-%d").to_string()),
                open: Some(row.open),
                high: Some(row.high),
                low: Some(row.low),
                close: Some(row.close),
                extra: row.extra.iter().cloned().map(Some).collect(),
            })
            .collect();
        Self::new(series.extra_columns().to_vec(), rows)
    }
}
