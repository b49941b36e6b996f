//! IndicatorRow: a price row extended with the derived indicator columns.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::price::{ColumnKind, ExtraColumn, PriceRow};
use super::PRICE_COLUMNS;

/// Stored names of the derived columns, in storage order.
pub const INDICATOR_COLUMNS: [&str; 6] =
    ["MA_50", "BB_middle", "BB_std", "BB_upper", "BB_lower", "RSI"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRow {
    /// Index of the row. Midnight of the trading day before resampling,
    /// the slot time after.
    pub timestamp: NaiveDateTime,
    /// The daily observation this row carries.
    pub price: PriceRow,
    pub ma_50: f64,
    pub bb_middle: f64,
    pub bb_std: f64,
    pub bb_upper: f64,
    pub bb_lower: f64,
    pub rsi: f64,
}

impl IndicatorRow {
    /// Derived values in `INDICATOR_COLUMNS` order.
    pub fn indicators(&self) -> [f64; 6] {
        [
            self.ma_50,
            self.bb_middle,
            self.bb_std,
            self.bb_upper,
            self.bb_lower,
            self.rsi,
        ]
    }

    /// Trading day the values were observed on.
    pub fn source_date(&self) -> NaiveDate {
        self.price.date
    }
}

/// Time-ordered indicator rows sharing one passthrough schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSeries {
    extra_columns: Vec<ExtraColumn>,
    rows: Vec<IndicatorRow>,
}

impl IndicatorSeries {
    pub fn new(extra_columns: Vec<ExtraColumn>, rows: Vec<IndicatorRow>) -> Self {
        debug_assert!(rows.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        Self {
            extra_columns,
            rows,
        }
    }

    pub fn extra_columns(&self) -> &[ExtraColumn] {
        &self.extra_columns
    }

    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every column that must hold real numbers: OHLC, numeric passthrough
    /// columns, then the indicator columns.
    pub fn numeric_columns(&self) -> Vec<&str> {
        PRICE_COLUMNS
            .iter()
            .copied()
            .chain(
                self.extra_columns
                    .iter()
                    .filter(|c| c.kind == ColumnKind::Numeric)
                    .map(|c| c.name.as_str()),
            )
            .chain(INDICATOR_COLUMNS)
            .collect()
    }

    /// Number of distinct trading days represented in the series.
    pub fn source_days(&self) -> usize {
        let mut days: Vec<NaiveDate> = self.rows.iter().map(IndicatorRow::source_date).collect();
        days.dedup();
        days.len()
    }
}
