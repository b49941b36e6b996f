//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! Four series (separate Indicator instances):
//! - Middle: rolling mean(close, period)
//! - Std: rolling sample stddev(close, period), 0.0 for a single observation
//! - Upper: middle + mult * std
//! - Lower: middle - mult * std
//!
//! Minimum window 1, so every band is defined from the first row on.

use super::rolling::{rolling_mean, rolling_sample_std};
use crate::components::indicator::Indicator;
use crate::domain::PriceRow;

/// Which series of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
    Std,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn new(band: BollingerBand, period: usize, multiplier: f64) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        let label = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
            BollingerBand::Std => "std",
        };
        Self {
            period,
            multiplier,
            band,
            name: format!("bollinger_{label}_{period}_{multiplier}"),
        }
    }

    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::new(BollingerBand::Upper, period, multiplier)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::new(BollingerBand::Middle, period, multiplier)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::new(BollingerBand::Lower, period, multiplier)
    }

    pub fn std(period: usize, multiplier: f64) -> Self {
        Self::new(BollingerBand::Std, period, multiplier)
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn window(&self) -> usize {
        self.period
    }

    fn compute(&self, rows: &[PriceRow]) -> Vec<f64> {
        let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();
        match self.band {
            BollingerBand::Middle => rolling_mean(&closes, self.period),
            BollingerBand::Std => rolling_sample_std(&closes, self.period),
            BollingerBand::Upper | BollingerBand::Lower => {
                let sign = if self.band == BollingerBand::Upper { 1.0 } else { -1.0 };
                rolling_mean(&closes, self.period)
                    .into_iter()
                    .zip(rolling_sample_std(&closes, self.period))
                    .map(|(mean, std)| mean + sign * self.multiplier * std)
                    .collect()
            }
        }
    }
}
