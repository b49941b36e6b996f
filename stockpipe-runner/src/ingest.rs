//! CSV ingestion into a `RawTable`.
//!
//! Header-driven: `Date, Open, High, Low, Close` are located by name
//! (case-insensitive, whitespace-trimmed); every other column is carried
//! through as a passthrough column in header order.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use stockpipe_core::domain::{
    Cell, ColumnKind, ExtraColumn, RawRow, RawTable, DATE_COLUMN, INDICATOR_COLUMNS, PRICE_COLUMNS,
};
use thiserror::Error;

/// Cell spellings treated as missing, compared case-insensitively.
const MISSING_TOKENS: [&str; 4] = ["null", "nan", "na", "n/a"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),
    #[error("duplicate column {0:?}")]
    DuplicateColumn(String),
    #[error("non-numeric value {value:?} in column {column} of input row {line}")]
    NonNumeric {
        line: usize,
        column: &'static str,
        value: String,
    },
}

/// Read a CSV file.
pub fn read_csv(path: &Path) -> Result<RawTable, IngestError> {
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv_from(file)?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        columns = ?table.column_names(),
        "ingested CSV"
    );
    Ok(table)
}

/// Read CSV from any reader. The first record is the header.
pub fn read_csv_from<R: Read>(reader: R) -> Result<RawTable, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers)?;
    let records = reader
        .records()
        .collect::<Result<Vec<csv::StringRecord>, csv::Error>>()?;

    let extra_columns: Vec<ExtraColumn> = layout
        .extra
        .iter()
        .map(|(index, name)| {
            let numeric = records
                .iter()
                .filter_map(|r| present(r.get(*index)))
                .all(|v| v.parse::<f64>().is_ok());
            let kind = if numeric {
                ColumnKind::Numeric
            } else {
                ColumnKind::Text
            };
            ExtraColumn::new(name.clone(), kind)
        })
        .collect();

    let mut rows = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let line = i + 1;
        let price = |k: usize| parse_price(record, layout.prices[k], PRICE_COLUMNS[k], line);
        let extra = layout
            .extra
            .iter()
            .zip(&extra_columns)
            .map(|((index, _), column)| {
                present(record.get(*index)).map(|v| match column.kind {
                    // Numeric columns parsed above, so this never falls back
                    ColumnKind::Numeric => v
                        .parse::<f64>()
                        .map(Cell::Number)
                        .unwrap_or_else(|_| Cell::Text(v.to_string())),
                    ColumnKind::Text => Cell::Text(v.to_string()),
                })
            })
            .collect();

        rows.push(RawRow {
            line,
            date: present(record.get(layout.date)).map(str::to_string),
            open: price(0)?,
            high: price(1)?,
            low: price(2)?,
            close: price(3)?,
            extra,
        });
    }

    Ok(RawTable::new(extra_columns, rows))
}

/// Column positions resolved from the header record.
struct ColumnLayout {
    date: usize,
    prices: [usize; 4],
    extra: Vec<(usize, String)>,
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, IngestError> {
        let find = |wanted: &'static str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
                .ok_or(IngestError::MissingColumn(wanted))
        };
        let date = find(DATE_COLUMN)?;
        let prices = [
            find(PRICE_COLUMNS[0])?,
            find(PRICE_COLUMNS[1])?,
            find(PRICE_COLUMNS[2])?,
            find(PRICE_COLUMNS[3])?,
        ];

        let mut taken: Vec<String> = std::iter::once(DATE_COLUMN)
            .chain(PRICE_COLUMNS)
            .chain(INDICATOR_COLUMNS)
            .map(str::to_ascii_lowercase)
            .collect();
        let mut extra = Vec::new();
        for (index, header) in headers.iter().enumerate() {
            if index == date || prices.contains(&index) {
                continue;
            }
            let name = match header.trim() {
                "" => format!("column_{}", index + 1),
                h => h.to_string(),
            };
            let key = name.to_ascii_lowercase();
            if taken.contains(&key) {
                return Err(IngestError::DuplicateColumn(name));
            }
            taken.push(key);
            extra.push((index, name));
        }

        Ok(Self {
            date,
            prices,
            extra,
        })
    }
}

/// The cell's text, or `None` when it is empty or a missing-value token.
fn present(cell: Option<&str>) -> Option<&str> {
    let value = cell?.trim();
    if value.is_empty() || MISSING_TOKENS.iter().any(|t| value.eq_ignore_ascii_case(t)) {
        None
    } else {
        Some(value)
    }
}

fn parse_price(
    record: &csv::StringRecord,
    index: usize,
    column: &'static str,
    line: usize,
) -> Result<Option<f64>, IngestError> {
    match present(record.get(index)) {
        None => Ok(None),
        Some(v) => v.parse::<f64>().map(Some).map_err(|_| IngestError::NonNumeric {
            line,
            column,
            value: v.to_string(),
        }),
    }
}
