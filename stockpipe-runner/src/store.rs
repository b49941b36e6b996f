//! Relational sink for the indicator table.
//!
//! Every write is a full replace: drop, create, insert, commit, all inside
//! one transaction. The connection is opened for the write and dropped on
//! return.

use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OpenFlags};
use stockpipe_core::domain::{
    Cell, ColumnKind, ExtraColumn, IndicatorRow, IndicatorSeries, DATE_COLUMN, INDICATOR_COLUMNS,
    PRICE_COLUMNS,
};
use thiserror::Error;

use crate::config::StoreConfig;

/// Storage format of the `Date` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be opened or written.
    #[error("store connection error ({target}): {source}")]
    Connection {
        target: String,
        #[source]
        source: BoxError,
    },
    #[error("store query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("stored timestamp {0:?} is not YYYY-MM-DD HH:MM:SS")]
    BadTimestamp(String),
}

/// Destination for a computed indicator series.
pub trait TableSink {
    /// Replace the destination table with `series`. Returns rows written.
    fn replace(&self, series: &IndicatorSeries) -> Result<usize, StoreError>;

    /// Human-readable destination, without credentials.
    fn describe(&self) -> String;
}

/// SQLite-backed store. The database file is `<host>/<database>.sqlite3`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    config: StoreConfig,
}

impl SqliteStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    fn connection_error(&self, source: impl Into<BoxError>) -> StoreError {
        StoreError::Connection {
            target: self.config.describe(),
            source: source.into(),
        }
    }

    fn open_for_write(&self) -> Result<Connection, StoreError> {
        std::fs::create_dir_all(&self.config.host).map_err(|e| self.connection_error(e))?;
        Connection::open(self.config.database_path()).map_err(|e| self.connection_error(e))
    }

    fn open_for_read(&self) -> Result<Connection, StoreError> {
        Connection::open_with_flags(
            self.config.database_path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.connection_error(e))
    }

    /// `(Date, column)` pairs ordered by date.
    pub fn read_series(&self, column: &str) -> Result<Vec<(NaiveDateTime, f64)>, StoreError> {
        let conn = self.open_for_read()?;
        let sql = format!(
            "SELECT {}, {} FROM {} ORDER BY {}",
            quote(DATE_COLUMN),
            quote(column),
            quote(&self.config.table),
            quote(DATE_COLUMN),
        );
        let mut stmt = conn.prepare(&sql)?;
        let raw = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        let points = raw
            .into_iter()
            .map(|(date, value)| {
                NaiveDateTime::parse_from_str(&date, TIMESTAMP_FORMAT)
                    .map(|ts| (ts, value))
                    .map_err(|_| StoreError::BadTimestamp(date))
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(column, rows = points.len(), "read series from store");
        Ok(points)
    }

    pub fn row_count(&self) -> Result<usize, StoreError> {
        let conn = self.open_for_read()?;
        let sql = format!("SELECT COUNT(*) FROM {}", quote(&self.config.table));
        let count: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Column names of the stored table, in table order.
    pub fn columns(&self) -> Result<Vec<String>, StoreError> {
        let conn = self.open_for_read()?;
        let sql = format!("SELECT name FROM pragma_table_info({})", literal(&self.config.table));
        let mut stmt = conn.prepare(&sql)?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }
}

impl TableSink for SqliteStore {
    fn replace(&self, series: &IndicatorSeries) -> Result<usize, StoreError> {
        let mut conn = self.open_for_write()?;
        let written = write_table(&mut conn, &self.config.table, series)
            .map_err(|e| self.connection_error(e))?;
        tracing::info!(
            target_db = %self.config.describe(),
            table = %self.config.table,
            rows = written,
            "replaced table"
        );
        Ok(written)
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.config.describe(), self.config.table)
    }
}

fn write_table(
    conn: &mut Connection,
    table: &str,
    series: &IndicatorSeries,
) -> rusqlite::Result<usize> {
    let columns = table_columns(series.extra_columns());
    let definitions: Vec<String> = columns
        .iter()
        .map(|(name, sql_type)| format!("{} {sql_type}", quote(name)))
        .collect();
    let names: Vec<String> = columns.iter().map(|(name, _)| quote(name)).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();

    let tx = conn.transaction()?;
    tx.execute(&format!("DROP TABLE IF EXISTS {}", quote(table)), [])?;
    tx.execute(
        &format!("CREATE TABLE {} ({})", quote(table), definitions.join(", ")),
        [],
    )?;

    let mut stmt = tx.prepare(&format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote(table),
        names.join(", "),
        placeholders.join(", ")
    ))?;
    for row in series.rows() {
        stmt.execute(params_from_iter(row_values(row)))?;
    }
    drop(stmt);

    tx.commit()?;
    Ok(series.len())
}

/// `(name, SQL type)` for every stored column, in storage order.
fn table_columns(extra_columns: &[ExtraColumn]) -> Vec<(String, &'static str)> {
    let mut columns = vec![(DATE_COLUMN.to_string(), "TEXT")];
    columns.extend(PRICE_COLUMNS.iter().map(|c| (c.to_string(), "REAL")));
    columns.extend(extra_columns.iter().map(|c| {
        let sql_type = match c.kind {
            ColumnKind::Numeric => "REAL",
            ColumnKind::Text => "TEXT",
        };
        (c.name.clone(), sql_type)
    }));
    columns.extend(INDICATOR_COLUMNS.iter().map(|c| (c.to_string(), "REAL")));
    columns
}

fn row_values(row: &IndicatorRow) -> Vec<Value> {
    let mut values = Vec::with_capacity(11 + row.price.extra.len());
    values.push(Value::Text(row.timestamp.format(TIMESTAMP_FORMAT).to_string()));
    values.extend(row.price.prices().map(Value::Real));
    values.extend(row.price.extra.iter().map(|cell| match cell {
        Cell::Number(v) => Value::Real(*v),
        Cell::Text(s) => Value::Text(s.clone()),
    }));
    values.extend(row.indicators().map(Value::Real));
    values
}

/// Double-quoted SQL identifier.
fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Single-quoted SQL string literal.
fn literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use stockpipe_core::domain::{PriceRow, PriceSeries};
    use stockpipe_core::compute_indicators;

    fn store_in(dir: &tempfile::TempDir) -> SqliteStore {
        SqliteStore::new(StoreConfig {
            host: dir.path().to_string_lossy().into_owned(),
            ..StoreConfig::default()
        })
    }

    fn series(closes: &[f64]) -> IndicatorSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let date = base + chrono::Duration::days(i as i64);
                let mut row = PriceRow::new(date, c, c + 1.0, c - 1.0, c);
                row.extra = vec![Cell::Number(1000.0 + i as f64), Cell::Text("NSE".into())];
                row
            })
            .collect();
        let extra = vec![
            ExtraColumn::new("Adj Close", ColumnKind::Numeric),
            ExtraColumn::new("Exchange", ColumnKind::Text),
        ];
        compute_indicators(&PriceSeries::from_rows(extra, rows).unwrap())
    }

    #[test]
    fn replace_writes_every_row_in_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let data = series(&[10.0, 20.0]);

        assert_eq!(store.replace(&data).unwrap(), 25);
        assert_eq!(store.row_count().unwrap(), 25);
        assert_eq!(
            store.columns().unwrap(),
            vec![
                "Date", "Open", "High", "Low", "Close", "Adj Close", "Exchange", "MA_50",
                "BB_middle", "BB_std", "BB_upper", "BB_lower", "RSI"
            ]
        );
        assert!(dir.path().join("invsto.sqlite3").exists());
    }

    #[test]
    fn replace_discards_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.replace(&series(&[1.0, 2.0, 3.0])).unwrap();
        store.replace(&series(&[5.0])).unwrap();
        assert_eq!(store.row_count().unwrap(), 1);
        let low = store.read_series("Low").unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].1, 4.0);
    }

    #[test]
    fn read_series_returns_ordered_timestamps() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.replace(&series(&[10.0, 20.0])).unwrap();

        let close = store.read_series("Close").unwrap();
        assert_eq!(close.len(), 25);
        assert!(close.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(close[0].0.to_string(), "2024-01-01 00:00:00");
        assert_eq!(close[23].1, 10.0);
        assert_eq!(close[24].1, 20.0);
    }

    #[test]
    fn reading_missing_database_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = store_in(&dir).row_count().unwrap_err();
        assert!(matches!(err, StoreError::Connection { .. }));
        assert!(!err.to_string().contains("password"));
    }

    #[test]
    fn unwritable_host_is_connection_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, b"x").unwrap();
        let store = SqliteStore::new(StoreConfig {
            host: blocker.to_string_lossy().into_owned(),
            ..StoreConfig::default()
        });
        let err = store.replace(&series(&[1.0])).unwrap_err();
        assert!(matches!(err, StoreError::Connection { .. }));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote("Adj Close"), "\"Adj Close\"");
        assert_eq!(quote("a\"b"), "\"a\"\"b\"");
        assert_eq!(literal("it's"), "'it''s'");
    }
}
