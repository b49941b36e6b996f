//! stockpipe core: price series types, cleaning, indicators, validation.
//!
//! This crate holds the pure part of the pipeline; it does no I/O:
//! - Domain types (raw ingested rows, daily price rows, indicator rows)
//! - Cleaner: missing-value removal, z-score outlier rejection, date parsing
//! - Indicator engine: moving average, Bollinger Bands, RSI, then
//!   forward-fill resampling onto an hourly grid
//! - Validator: every numeric cell must be a finite number
//!
//! Each stage takes the previous stage's value and returns a new one.

pub mod components;
pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod validate;

pub use data::{clean, CleanReport, Cleaned, Cleaner, CleaningConfig, MalformedDateError};
pub use domain::{IndicatorSeries, PriceSeries, RawTable};
pub use engine::{compute_indicators, IndicatorEngine, IndicatorParams};
pub use validate::{validate, DataIntegrityError, Offender};
