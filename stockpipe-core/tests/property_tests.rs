//! Property tests for cleaning and indicator invariants.
//!
//! Uses proptest to verify:
//! 1. Small tables never lose rows to the outlier filter
//! 2. Survivors of the outlier filter sit inside the threshold
//! 3. Rolling windows stay inside the observed range
//! 4. RSI stays in [0, 100] and the bands bracket the middle
//! 5. Hourly resampling preserves every trading day

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use stockpipe_core::data::zscore_keep_mask;
use stockpipe_core::domain::{PriceRow, PriceSeries, RawRow, RawTable};
use stockpipe_core::indicators::rolling::{rolling_mean, rolling_sample_std};
use stockpipe_core::{clean, compute_indicators, validate, IndicatorEngine};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_price() -> impl Strategy<Value = f64> {
    (10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_closes(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_price(), 1..max_len)
}

fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let base = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
    let rows = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            PriceRow::new(base + Duration::days(i as i64), c - 0.25, c + 1.0, c - 1.0, c)
        })
        .collect();
    PriceSeries::from_rows(vec![], rows).unwrap()
}

fn raw_table(closes: &[f64]) -> RawTable {
    let base = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
    let rows = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| RawRow {
            line: i + 1,
            date: Some((base + Duration::days(i as i64)).to_string()),
            open: Some(c),
            high: Some(c + 1.0),
            low: Some(c - 1.0),
            close: Some(c),
            extra: vec![],
        })
        .collect();
    RawTable::new(vec![], rows)
}

fn population_z(values: &[f64], x: f64) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    if var == 0.0 {
        0.0
    } else {
        (x - mean) / var.sqrt()
    }
}

// ── 1–2. Outlier filter ──────────────────────────────────────────────

proptest! {
    /// With at most nine rows no value can reach |z| = 3.
    #[test]
    fn small_tables_keep_every_row(closes in prop::collection::vec(arb_price(), 0..10)) {
        let prices: Vec<[f64; 4]> = closes.iter().map(|&c| [c, c + 1.0, c - 1.0, c]).collect();
        let keep = zscore_keep_mask(&prices, 3.0);
        prop_assert!(keep.iter().all(|k| *k));
    }

    /// Every surviving price is strictly inside the threshold, measured
    /// against the statistics of the table the filter saw.
    #[test]
    fn survivors_are_within_threshold(closes in arb_closes(120), spike in 1_000.0..1e6_f64) {
        let mut closes = closes;
        closes.push(spike);
        let prices: Vec<[f64; 4]> = closes.iter().map(|&c| [c, c + 1.0, c - 1.0, c]).collect();
        let keep = zscore_keep_mask(&prices, 3.0);

        for col in 0..4 {
            let column: Vec<f64> = prices.iter().map(|p| p[col]).collect();
            for (row, kept) in prices.iter().zip(&keep) {
                if *kept {
                    prop_assert!(population_z(&column, row[col]).abs() < 3.0);
                }
            }
        }
    }

    /// Cleaning never invents rows and keeps dates strictly ascending.
    #[test]
    fn cleaning_shrinks_and_orders(closes in arb_closes(80)) {
        let raw = raw_table(&closes);
        let series = clean(raw).unwrap();
        prop_assert!(series.len() <= closes.len());
        prop_assert!(series.rows().windows(2).all(|w| w[0].date < w[1].date));
    }
}

// ── 3–4. Indicators ──────────────────────────────────────────────────

proptest! {
    /// A rolling mean lies between the min and max of its window.
    #[test]
    fn rolling_mean_within_window_range(closes in arb_closes(100), window in 1usize..60) {
        let means = rolling_mean(&closes, window);
        prop_assert_eq!(means.len(), closes.len());
        for (i, m) in means.iter().enumerate() {
            let start = (i + 1).saturating_sub(window);
            let slice = &closes[start..=i];
            let lo = slice.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = slice.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(*m >= lo - 1e-9 && *m <= hi + 1e-9);
        }
    }

    /// Sample std is non-negative and zero for the first observation.
    #[test]
    fn rolling_std_non_negative(closes in arb_closes(100), window in 1usize..40) {
        let stds = rolling_sample_std(&closes, window);
        prop_assert_eq!(stds[0], 0.0);
        prop_assert!(stds.iter().all(|s| *s >= 0.0 && s.is_finite()));
    }

    /// RSI is bounded and the bands bracket the middle line.
    #[test]
    fn indicator_rows_are_bounded(closes in arb_closes(90)) {
        let series = series_from_closes(&closes);
        let daily = IndicatorEngine::default().compute_daily(&series);
        for row in daily.rows() {
            prop_assert!((0.0..=100.0).contains(&row.rsi), "rsi out of range: {}", row.rsi);
            prop_assert!(row.bb_lower <= row.bb_middle + 1e-9);
            prop_assert!(row.bb_upper >= row.bb_middle - 1e-9);
            prop_assert!((row.bb_upper - row.bb_middle - 2.0 * row.bb_std).abs() < 1e-6);
        }
    }
}

// ── 5. Resampling ────────────────────────────────────────────────────

proptest! {
    /// Hourly output covers first to last day inclusive, keeps every
    /// trading day, and always validates.
    #[test]
    fn resampling_preserves_days(closes in arb_closes(40)) {
        let series = series_from_closes(&closes);
        let out = compute_indicators(&series);
        prop_assert_eq!(out.len(), (closes.len() - 1) * 24 + 1);
        prop_assert_eq!(out.source_days(), closes.len());
        prop_assert!(validate(&out).is_ok());
    }
}
