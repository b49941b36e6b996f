//! Concrete indicator implementations.
//!
//! All indicators implement the `Indicator` trait from `components::indicator`
//! and share the rolling-window helpers in `rolling`. Every window uses a
//! minimum of one observation.
//!
//! Bollinger Bands produce several series; each band is a separate named
//! instance, keeping the single-series `Indicator` trait unchanged.

pub mod bollinger;
pub mod rolling;
pub mod rsi;
pub mod sma;

pub use bollinger::{Bollinger, BollingerBand};
pub use rsi::Rsi;
pub use sma::Sma;

/// Create synthetic daily rows from close prices for testing.
///
/// open = prev_close (or close for the first row),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0.
#[cfg(test)]
pub fn make_rows(closes: &[f64]) -> Vec<crate::domain::PriceRow> {
    use crate::domain::PriceRow;
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            PriceRow::new(
                base_date + chrono::Duration::days(i as i64),
                open,
                open.max(close) + 1.0,
                open.min(close) - 1.0,
                close,
            )
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
