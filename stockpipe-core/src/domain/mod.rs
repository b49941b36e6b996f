//! Domain types for the price pipeline.

pub mod indicator_row;
pub mod price;
pub mod raw;

pub use indicator_row::{IndicatorRow, IndicatorSeries, INDICATOR_COLUMNS};
pub use price::{Cell, ColumnKind, ExtraColumn, PriceRow, PriceSeries, SeriesError};
pub use raw::{RawRow, RawTable};

/// Name of the date column in the input file and the stored table.
pub const DATE_COLUMN: &str = "Date";

/// Names of the four price columns, in storage order.
pub const PRICE_COLUMNS: [&str; 4] = ["Open", "High", "Low", "Close"];
