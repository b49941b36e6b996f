//! Component traits.
//!
//! Indicators are the only pluggable component: each one turns a daily price
//! history into one numeric column.

pub mod indicator;

pub use indicator::{Indicator, IndicatorValues};
