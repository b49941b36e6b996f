//! Indicator precomputation.
//!
//! All indicators are computed once over the whole daily series and stored in
//! an `IndicatorValues` container keyed by indicator name.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::PriceRow;

/// Run every indicator over `rows`.
pub fn precompute_indicators(
    rows: &[PriceRow],
    indicators: &[Box<dyn Indicator>],
) -> IndicatorValues {
    let mut iv = IndicatorValues::new();
    for indicator in indicators {
        let series = indicator.compute(rows);
        debug_assert_eq!(
            series.len(),
            rows.len(),
            "indicator '{}' produced {} values for {} rows",
            indicator.name(),
            series.len(),
            rows.len(),
        );
        iv.insert(indicator.name(), series);
    }
    iv
}

/// The longest window across a set of indicators.
pub fn longest_window(indicators: &[Box<dyn Indicator>]) -> usize {
    indicators.iter().map(|i| i.window()).max().unwrap_or(0)
}
