//! Trailing-window statistics with a minimum window of one observation.
//!
//! For row i the window is `values[i + 1 - min(i + 1, window) ..= i]`.

/// Window bounds for row `i`.
fn window_range(i: usize, window: usize) -> std::ops::RangeInclusive<usize> {
    let len = (i + 1).min(window);
    (i + 1 - len)..=i
}

/// Rolling arithmetic mean.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "rolling window must be >= 1");
    (0..values.len())
        .map(|i| {
            let slice = &values[window_range(i, window)];
            slice.iter().sum::<f64>() / slice.len() as f64
        })
        .collect()
}

/// Rolling sample standard deviation (divide by N - 1).
///
/// A window holding a single observation has no spread and yields 0.0.
pub fn rolling_sample_std(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "rolling window must be >= 1");
    (0..values.len())
        .map(|i| {
            let slice = &values[window_range(i, window)];
            let n = slice.len();
            if n < 2 {
                return 0.0;
            }
            let mean = slice.iter().sum::<f64>() / n as f64;
            let ss: f64 = slice.iter().map(|v| (v - mean) * (v - mean)).sum();
            (ss / (n - 1) as f64).sqrt()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn mean_uses_available_history_before_full_window() {
        let result = rolling_mean(&[2.0, 4.0, 6.0, 8.0], 3);
        assert_approx(result[0], 2.0, DEFAULT_EPSILON);
        assert_approx(result[1], 3.0, DEFAULT_EPSILON);
        assert_approx(result[2], 4.0, DEFAULT_EPSILON);
        assert_approx(result[3], 6.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sample_std_single_observation_is_zero() {
        let result = rolling_sample_std(&[5.0, 7.0], 20);
        assert_eq!(result[0], 0.0);
        // std([5, 7], ddof=1) = sqrt(2)
        assert_approx(result[1], 2.0_f64.sqrt(), DEFAULT_EPSILON);
    }

    #[test]
    fn sample_std_rolls_off_old_values() {
        let result = rolling_sample_std(&[100.0, 1.0, 1.0, 1.0], 3);
        assert_approx(result[3], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(rolling_mean(&[], 5).is_empty());
        assert!(rolling_sample_std(&[], 5).is_empty());
    }
}
