//! Indicator engine: daily indicators, then forward-fill resampling.
//!
//! The engine never mutates its input. `compute_indicators` builds a new
//! daily `IndicatorSeries` from a cleaned `PriceSeries`, and
//! `resample_forward_fill` builds the expanded series from that.

pub mod precompute;
pub mod resample;

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::components::indicator::Indicator;
use crate::domain::{IndicatorRow, IndicatorSeries, PriceSeries, INDICATOR_COLUMNS};
use crate::indicators::{Bollinger, Rsi, Sma};

pub use precompute::{longest_window, precompute_indicators};
pub use resample::{daily_first, resample_forward_fill};

/// Coarsest resample grid: one slot per day.
pub const MAX_RESAMPLE_MINUTES: i64 = 24 * 60;

/// Window lengths and resample step for the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    pub ma_window: usize,
    pub bb_window: usize,
    pub bb_multiplier: f64,
    pub rsi_window: usize,
    /// Resample grid spacing in minutes.
    pub resample_minutes: i64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            ma_window: 50,
            bb_window: 20,
            bb_multiplier: 2.0,
            rsi_window: 14,
            resample_minutes: 60,
        }
    }
}

impl IndicatorParams {
    /// Grid spacing, clamped to `1..=MAX_RESAMPLE_MINUTES` minutes.
    pub fn resample_step(&self) -> Duration {
        Duration::minutes(self.resample_minutes.clamp(1, MAX_RESAMPLE_MINUTES))
    }
}

/// The indicator set for one parameterization, in `INDICATOR_COLUMNS` order:
/// moving average, Bollinger middle/std/upper/lower, RSI.
pub struct IndicatorEngine {
    params: IndicatorParams,
    indicators: Vec<Box<dyn Indicator>>,
}

impl IndicatorEngine {
    pub fn new(params: IndicatorParams) -> Self {
        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Sma::new(params.ma_window)),
            Box::new(Bollinger::middle(params.bb_window, params.bb_multiplier)),
            Box::new(Bollinger::std(params.bb_window, params.bb_multiplier)),
            Box::new(Bollinger::upper(params.bb_window, params.bb_multiplier)),
            Box::new(Bollinger::lower(params.bb_window, params.bb_multiplier)),
            Box::new(Rsi::new(params.rsi_window)),
        ];
        debug_assert_eq!(indicators.len(), INDICATOR_COLUMNS.len());
        Self { params, indicators }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    /// Longest trailing window in use. Rows before it use partial windows.
    pub fn warmup(&self) -> usize {
        longest_window(&self.indicators)
    }

    /// Daily indicator rows, one per input row, timestamped at midnight.
    pub fn compute_daily(&self, series: &PriceSeries) -> IndicatorSeries {
        let rows = series.rows();
        let iv = precompute_indicators(rows, &self.indicators);
        let value = |k: usize, i: usize| iv.get(self.indicators[k].name(), i).unwrap_or(f64::NAN);

        let out = rows
            .iter()
            .enumerate()
            .map(|(i, row)| IndicatorRow {
                timestamp: row.date.and_time(NaiveTime::MIN),
                price: row.clone(),
                ma_50: value(0, i),
                bb_middle: value(1, i),
                bb_std: value(2, i),
                bb_upper: value(3, i),
                bb_lower: value(4, i),
                rsi: value(5, i),
            })
            .collect();

        IndicatorSeries::new(series.extra_columns().to_vec(), out)
    }

    /// Daily indicators expanded onto the resample grid.
    pub fn run(&self, series: &PriceSeries) -> IndicatorSeries {
        let daily = self.compute_daily(series);
        let expanded = resample_forward_fill(&daily, self.params.resample_step());
        tracing::info!(
            daily_rows = daily.len(),
            resampled_rows = expanded.len(),
            step_minutes = self.params.resample_minutes,
            "indicators computed"
        );
        expanded
    }
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self::new(IndicatorParams::default())
    }
}

/// Compute indicators with default windows and resample hourly.
pub fn compute_indicators(series: &PriceSeries) -> IndicatorSeries {
    IndicatorEngine::default().run(series)
}
