//! Final integrity check before storage.
//!
//! Every numeric column (prices, numeric passthrough columns, indicators)
//! must hold a finite real number in every row.

use std::fmt::Write;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::{ColumnKind, IndicatorSeries, INDICATOR_COLUMNS, PRICE_COLUMNS};

/// How many offenders the error message spells out.
const DISPLAY_LIMIT: usize = 20;

/// One bad cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Offender {
    pub row: usize,
    pub timestamp: NaiveDateTime,
    pub column: String,
    pub value: String,
}

/// Non-numeric values found in numeric columns. Carries every offender.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{}", self.summary())]
pub struct DataIntegrityError {
    pub offenders: Vec<Offender>,
}

impl DataIntegrityError {
    fn summary(&self) -> String {
        let mut out = format!("non-numeric values in {} cell(s):", self.offenders.len());
        for o in self.offenders.iter().take(DISPLAY_LIMIT) {
            let _ = write!(
                out,
                " [row {} ({}) column {} = {}]",
                o.row, o.timestamp, o.column, o.value
            );
        }
        if self.offenders.len() > DISPLAY_LIMIT {
            let _ = write!(out, " ... and {} more", self.offenders.len() - DISPLAY_LIMIT);
        }
        out
    }
}

/// Check every numeric cell of `series`.
pub fn validate(series: &IndicatorSeries) -> Result<(), DataIntegrityError> {
    let mut offenders = Vec::new();
    let extra_columns = series.extra_columns();

    for (index, row) in series.rows().iter().enumerate() {
        let mut check = |column: &str, value: String, ok: bool| {
            if !ok {
                offenders.push(Offender {
                    row: index,
                    timestamp: row.timestamp,
                    column: column.to_string(),
                    value,
                });
            }
        };

        for (name, value) in PRICE_COLUMNS.into_iter().zip(row.price.prices()) {
            check(name, value.to_string(), value.is_finite());
        }
        for (column, cell) in extra_columns.iter().zip(&row.price.extra) {
            if column.kind != ColumnKind::Numeric {
                continue;
            }
            let ok = cell.as_f64().is_some_and(f64::is_finite);
            check(&column.name, cell.to_string(), ok);
        }
        for (name, value) in INDICATOR_COLUMNS.into_iter().zip(row.indicators()) {
            check(name, value.to_string(), value.is_finite());
        }
    }

    if offenders.is_empty() {
        Ok(())
    } else {
        tracing::error!(count = offenders.len(), "integrity check failed");
        Err(DataIntegrityError { offenders })
    }
}
