//! Relative Strength Index (RSI).
//!
//! Simple-average variant: average gain and average loss are rolling means
//! (minimum window 1) of the positive and negative day-over-day close changes.
//! The first row has no previous close and counts as a zero change.
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Edge cases: avg_loss == 0 and avg_gain == 0 → 50; avg_loss == 0 → 100.

use super::rolling::rolling_mean;
use crate::components::indicator::Indicator;
use crate::domain::PriceRow;

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn window(&self) -> usize {
        self.period
    }

    fn compute(&self, rows: &[PriceRow]) -> Vec<f64> {
        let changes: Vec<f64> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| if i == 0 { 0.0 } else { row.close - rows[i - 1].close })
            .collect();

        let gains: Vec<f64> = changes.iter().map(|&ch| ch.max(0.0)).collect();
        let losses: Vec<f64> = changes.iter().map(|&ch| (-ch).max(0.0)).collect();

        rolling_mean(&gains, self.period)
            .into_iter()
            .zip(rolling_mean(&losses, self.period))
            .map(|(avg_gain, avg_loss)| compute_rsi(avg_gain, avg_loss))
            .collect()
    }
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_rows};

    #[test]
    fn rsi_all_gains() {
        let closes: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
        let result = Rsi::new(14).compute(&make_rows(&closes));
        assert_eq!(result[0], 50.0);
        for v in &result[1..] {
            assert_eq!(*v, 100.0);
        }
    }

    #[test]
    fn rsi_all_losses() {
        let rows = make_rows(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = Rsi::new(3).compute(&rows);
        // Only losses → RS = 0 → RSI = 0
        for v in &result[1..] {
            assert_approx(*v, 0.0, 1e-9);
        }
    }

    #[test]
    fn rsi_flat_is_neutral() {
        let result = Rsi::new(14).compute(&make_rows(&[100.0; 20]));
        assert!(result.iter().all(|&v| v == 50.0));
    }

    #[test]
    fn rsi_mixed() {
        // Closes: 44, 44.34, 44.09, 43.61, 44.33
        // Changes: 0, +0.34, -0.25, -0.48, +0.72
        // period=3 at row 3: gains (0.34, 0, 0) → 0.34/3; losses (0, 0.25, 0.48) → 0.73/3
        // RSI = 100 - 100/(1 + 0.34/0.73) = 31.7757...
        let rows = make_rows(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let result = Rsi::new(3).compute(&rows);
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
    }

    #[test]
    fn rsi_bounds() {
        let rows = make_rows(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        let result = Rsi::new(3).compute(&rows);
        for (i, &v) in result.iter().enumerate() {
            assert!((0.0..=100.0).contains(&v), "RSI out of bounds at row {i}: {v}");
        }
    }

    #[test]
    fn rsi_window() {
        assert_eq!(Rsi::new(14).window(), 14);
        assert_eq!(Rsi::new(14).name(), "rsi_14");
    }
}
