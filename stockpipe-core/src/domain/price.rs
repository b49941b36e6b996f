//! PriceRow and PriceSeries: the cleaned daily price data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A passthrough cell value. Passthrough columns are carried through the
/// pipeline untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

/// Whether a passthrough column holds numbers or free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Numeric,
    Text,
}

/// Schema entry for a passthrough column (e.g. `Adj Close`, `Volume`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraColumn {
    pub name: String,
    pub kind: ColumnKind,
}

impl ExtraColumn {
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One calendar day of OHLC data for a single instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Passthrough cells, aligned with `PriceSeries::extra_columns`.
    pub extra: Vec<Cell>,
}

impl PriceRow {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            extra: Vec::new(),
        }
    }

    /// OHLC values in storage order.
    pub fn prices(&self) -> [f64; 4] {
        [self.open, self.high, self.low, self.close]
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("rows out of order at index {index}: {date} does not follow {previous}")]
    Unordered {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },

    #[error("row {index} has {actual} passthrough cells, schema has {expected}")]
    ExtraWidth {
        index: usize,
        expected: usize,
        actual: usize,
    },
}

/// Date-keyed, strictly ascending daily series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    extra_columns: Vec<ExtraColumn>,
    rows: Vec<PriceRow>,
}

impl PriceSeries {
    /// Build a series, checking that dates are strictly ascending and that
    /// every row matches the passthrough schema.
    pub fn from_rows(
        extra_columns: Vec<ExtraColumn>,
        rows: Vec<PriceRow>,
    ) -> Result<Self, SeriesError> {
        for (index, row) in rows.iter().enumerate() {
            if row.extra.len() != extra_columns.len() {
                return Err(SeriesError::ExtraWidth {
                    index,
                    expected: extra_columns.len(),
                    actual: row.extra.len(),
                });
            }
            if index > 0 && rows[index - 1].date >= row.date {
                return Err(SeriesError::Unordered {
                    index,
                    previous: rows[index - 1].date,
                    date: row.date,
                });
            }
        }
        Ok(Self {
            extra_columns,
            rows,
        })
    }

    /// Rows already sorted, deduplicated and schema-aligned by the cleaner.
    pub(crate) fn from_canonical(extra_columns: Vec<ExtraColumn>, rows: Vec<PriceRow>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0].date < w[1].date));
        Self {
            extra_columns,
            rows,
        }
    }

    pub fn extra_columns(&self) -> &[ExtraColumn] {
        &self.extra_columns
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.date)
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.close).collect()
    }
}
