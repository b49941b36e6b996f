//! Reads the stored table and reduces it to one point per day.

use chrono::NaiveDate;
use stockpipe_core::engine::daily_first;
use stockpipe_runner::{SqliteStore, StoreError};

/// Column the viewer plots.
pub const PLOTTED_COLUMN: &str = "Low";

/// Daily points ready for plotting. X is days since the first point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    points: Vec<(NaiveDate, f64)>,
    xy: Vec<(f64, f64)>,
}

impl ChartData {
    pub fn new(points: Vec<(NaiveDate, f64)>) -> Self {
        let xy = match points.first() {
            Some(&(origin, _)) => points
                .iter()
                .map(|&(date, value)| ((date - origin).num_days() as f64, value))
                .collect(),
            None => Vec::new(),
        };
        Self { points, xy }
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    pub fn xy(&self) -> &[(f64, f64)] {
        &self.xy
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        let last = self.xy.last().map_or(0.0, |&(x, _)| x);
        [0.0, last.max(1.0)]
    }

    /// Value range padded by 5%; a flat series gets one unit either side.
    pub fn y_bounds(&self) -> [f64; 2] {
        let min = self.xy.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max = self.xy.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        if !min.is_finite() || !max.is_finite() {
            return [0.0, 1.0];
        }
        let padding = if max > min { (max - min) * 0.05 } else { 1.0 };
        [min - padding, max + padding]
    }

    /// First, middle and last dates.
    pub fn x_labels(&self) -> Vec<String> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if first.0 != last.0 => {
                let mid = self.points[self.points.len() / 2].0;
                vec![first.0.to_string(), mid.to_string(), last.0.to_string()]
            }
            (Some(first), _) => vec![first.0.to_string()],
            _ => Vec::new(),
        }
    }
}

/// `Date, Low` from the store, first value of each day.
pub fn load_daily_lows(store: &SqliteStore) -> Result<ChartData, StoreError> {
    let series = store.read_series(PLOTTED_COLUMN)?;
    let daily = daily_first(&series);
    tracing::info!(rows = series.len(), days = daily.len(), "loaded daily lows");
    Ok(ChartData::new(daily))
}
