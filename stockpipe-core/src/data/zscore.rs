//! Z-score outlier rejection over the four price columns.
//!
//! One static pass: column means and population standard deviations are
//! computed once over the given rows, then each row is kept only if every
//! column's |z| is strictly below the threshold.

/// Population mean and standard deviation of a column.
fn column_stats(values: impl Iterator<Item = f64> + Clone) -> (f64, f64) {
    let n = values.clone().count() as f64;
    let mean = values.clone().sum::<f64>() / n;
    let variance = values.map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Keep-mask for `rows` (each row is `[open, high, low, close]`).
///
/// A column with fewer than two values, or a zero/non-finite standard
/// deviation, rejects nothing.
pub fn zscore_keep_mask(rows: &[[f64; 4]], threshold: f64) -> Vec<bool> {
    let mut keep = vec![true; rows.len()];
    if rows.len() < 2 {
        return keep;
    }

    for col in 0..4 {
        let (mean, std) = column_stats(rows.iter().map(|r| r[col]));
        if !std.is_finite() || std == 0.0 {
            continue;
        }
        for (k, row) in keep.iter_mut().zip(rows) {
            if ((row[col] - mean) / std).abs() >= threshold {
                *k = false;
            }
        }
    }

    keep
}
