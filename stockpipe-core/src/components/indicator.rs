//! Indicator trait and precomputed indicator values container.
//!
//! Indicators are pure functions: price history in, numeric series out.
//! They are computed once over the whole daily series, before resampling.

use crate::domain::PriceRow;
use std::collections::HashMap;

/// Trait for indicators.
///
/// Indicators take a full daily series and produce one output value per row.
/// Every indicator uses a minimum window of one observation, so early rows
/// are computed from whatever history exists instead of being left undefined.
///
/// # Look-ahead contamination guard
/// No indicator value at row t may depend on price data from row t+1 or later.
pub trait Indicator: Send + Sync {
    /// Name the output series is stored under (e.g. "sma_50", "rsi_14").
    fn name(&self) -> &str;

    /// Number of trailing observations in a full window.
    fn window(&self) -> usize;

    /// Compute the indicator for the entire series.
    ///
    /// Returns a `Vec<f64>` of the same length as `rows`.
    fn compute(&self, rows: &[PriceRow]) -> Vec<f64>;
}

/// Container for precomputed indicator values, keyed by indicator name.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Get the indicator value at a specific row index.
    pub fn get(&self, name: &str, index: usize) -> Option<f64> {
        self.series.get(name).and_then(|v| v.get(index).copied())
    }

    /// Get the full series for a named indicator.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_values_insert_and_get() {
        let mut iv = IndicatorValues::new();
        iv.insert("sma_3", vec![100.0, 100.5, 101.0]);
        assert_eq!(iv.get("sma_3", 0), Some(100.0));
        assert_eq!(iv.get("sma_3", 2), Some(101.0));
        assert_eq!(iv.get("sma_3", 3), None); // out of bounds
    }

    #[test]
    fn indicator_values_missing_name() {
        let iv = IndicatorValues::new();
        assert_eq!(iv.get("nonexistent", 0), None);
        assert!(iv.get_series("nonexistent").is_none());
    }

    #[test]
    fn indicator_values_len() {
        let mut iv = IndicatorValues::new();
        assert!(iv.is_empty());
        iv.insert("sma_50", vec![1.0, 2.0]);
        iv.insert("rsi_14", vec![50.0, 100.0]);
        assert_eq!(iv.len(), 2);
    }
}
