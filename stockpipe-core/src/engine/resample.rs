//! Time resampling.
//!
//! Upsampling forward-fills the daily indicator rows onto a finer grid.
//! Downsampling keeps the first observation of each calendar day (the read
//! side used by the viewer).

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::domain::{IndicatorRow, IndicatorSeries};

/// Expand `series` onto a regular grid with spacing `step`.
///
/// The grid runs from the first timestamp to the last timestamp inclusive.
/// Each slot repeats the most recent row at or before it, so every hour of a
/// day carries that day's values until the next known day starts.
pub fn resample_forward_fill(series: &IndicatorSeries, step: Duration) -> IndicatorSeries {
    assert!(step > Duration::zero(), "resample step must be positive");
    let rows = series.rows();
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return series.clone();
    };

    let mut out = Vec::new();
    let mut source = 0;
    let mut slot = first.timestamp;
    while slot <= last.timestamp {
        while source + 1 < rows.len() && rows[source + 1].timestamp <= slot {
            source += 1;
        }
        out.push(IndicatorRow {
            timestamp: slot,
            ..rows[source].clone()
        });
        match slot.checked_add_signed(step) {
            Some(next) => slot = next,
            None => break,
        }
    }

    IndicatorSeries::new(series.extra_columns().to_vec(), out)
}

/// First value of each calendar day, in date order. Days without data are
/// skipped. Input must be sorted by time.
pub fn daily_first(points: &[(NaiveDateTime, f64)]) -> Vec<(NaiveDate, f64)> {
    let mut out: Vec<(NaiveDate, f64)> = Vec::new();
    for &(ts, value) in points {
        let day = ts.date();
        if out.last().map(|(d, _)| *d) != Some(day) {
            out.push((day, value));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PriceRow;

    fn indicator_row(day: u32, close: f64) -> IndicatorRow {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        IndicatorRow {
            timestamp: date.and_hms_opt(0, 0, 0).unwrap(),
            price: PriceRow::new(date, close, close, close, close),
            ma_50: close,
            bb_middle: close,
            bb_std: 0.0,
            bb_upper: close,
            bb_lower: close,
            rsi: 50.0,
        }
    }

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn hourly_forward_fill_two_days() {
        let daily =
            IndicatorSeries::new(vec![], vec![indicator_row(1, 10.0), indicator_row(2, 20.0)]);
        let hourly = resample_forward_fill(&daily, Duration::hours(1));

        assert_eq!(hourly.len(), 25);
        for (hour, row) in hourly.rows()[..24].iter().enumerate() {
            assert_eq!(row.timestamp, ts(1, hour as u32));
            assert_eq!(row.price.close, 10.0);
        }
        assert_eq!(hourly.rows()[24].timestamp, ts(2, 0));
        assert_eq!(hourly.rows()[24].price.close, 20.0);
    }

    #[test]
    fn gaps_are_filled_with_last_known_day() {
        let daily =
            IndicatorSeries::new(vec![], vec![indicator_row(5, 1.0), indicator_row(8, 2.0)]);
        let hourly = resample_forward_fill(&daily, Duration::hours(1));
        assert_eq!(hourly.len(), 3 * 24 + 1);
        // Weekend hours carry Friday's close
        let sunday_noon = hourly.rows().iter().find(|r| r.timestamp == ts(7, 12)).unwrap();
        assert_eq!(sunday_noon.price.close, 1.0);
        assert_eq!(sunday_noon.source_date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(hourly.source_days(), 2);
    }

    #[test]
    fn single_row_and_empty_series() {
        let one = IndicatorSeries::new(vec![], vec![indicator_row(1, 10.0)]);
        assert_eq!(resample_forward_fill(&one, Duration::hours(1)).len(), 1);
        let empty = IndicatorSeries::default();
        assert!(resample_forward_fill(&empty, Duration::hours(1)).is_empty());
    }

    #[test]
    fn grid_stops_at_the_end_of_the_calendar() {
        let mut row = indicator_row(1, 10.0);
        row.timestamp = NaiveDate::MAX.and_hms_opt(22, 0, 0).unwrap();
        let series = IndicatorSeries::new(vec![], vec![row]);
        let out = resample_forward_fill(&series, Duration::hours(2));
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows()[0].timestamp, NaiveDate::MAX.and_hms_opt(22, 0, 0).unwrap());
    }

    #[test]
    fn daily_first_takes_first_value_per_day() {
        let points = vec![(ts(1, 0), 5.0), (ts(1, 1), 6.0), (ts(2, 0), 7.0), (ts(4, 3), 8.0)];
        let daily = daily_first(&points);
        assert_eq!(
            daily,
            vec![
                (NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), 5.0),
                (NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), 7.0),
                (NaiveDate::from_ymd_opt(2024, 1, 4).unwrap(), 8.0),
            ]
        );
    }
}
