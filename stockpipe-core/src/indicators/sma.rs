//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a trailing window, minimum window 1:
//! the first `period - 1` rows average whatever history exists.

use super::rolling::rolling_mean;
use crate::components::indicator::Indicator;
use crate::domain::PriceRow;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn window(&self) -> usize {
        self.period
    }

    fn compute(&self, rows: &[PriceRow]) -> Vec<f64> {
        let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();
        rolling_mean(&closes, self.period)
    }
}
