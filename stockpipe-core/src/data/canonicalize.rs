//! Canonical ordering for cleaned rows: ascending by date, one row per date.

use crate::domain::PriceRow;
use chrono::NaiveDate;

/// Canonicalizer for daily price rows.
pub struct Canonicalizer;

impl Canonicalizer {
    /// Stable sort by date, then drop repeated dates keeping the first
    /// occurrence in input order. Returns the kept rows and the dates that
    /// had duplicates removed.
    pub fn canonicalize(mut rows: Vec<PriceRow>) -> (Vec<PriceRow>, Vec<NaiveDate>) {
        rows.sort_by_key(|r| r.date);

        let mut kept: Vec<PriceRow> = Vec::with_capacity(rows.len());
        let mut duplicates = Vec::new();
        for row in rows {
            match kept.last() {
                Some(prev) if prev.date == row.date => duplicates.push(row.date),
                _ => kept.push(row),
            }
        }
        (kept, duplicates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(day: u32, close: f64) -> PriceRow {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        PriceRow::new(date, close, close, close, close)
    }

    #[test]
    fn test_canonicalize_sorts_data() {
        let (rows, duplicates) =
            Canonicalizer::canonicalize(vec![row(3, 3.0), row(1, 1.0), row(2, 2.0)]);
        let days: Vec<f64> = rows.iter().map(|r| r.close).collect();
        assert_eq!(days, vec![1.0, 2.0, 3.0]);
        assert!(duplicates.is_empty());
    }

    #[test]
    fn test_canonicalize_removes_duplicates() {
        let (rows, duplicates) =
            Canonicalizer::canonicalize(vec![row(2, 20.0), row(1, 10.0), row(1, 11.0)]);
        assert_eq!(rows.len(), 2);
        // First occurrence should be kept
        assert_eq!(rows[0].close, 10.0);
        assert_eq!(duplicates, vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()]);
    }
}
