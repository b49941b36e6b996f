//! Cleaning stage: missing-value removal, outlier rejection, date parsing,
//! canonical ordering.

pub mod canonicalize;
pub mod clean;
pub mod dates;
pub mod zscore;

pub use canonicalize::Canonicalizer;
pub use clean::{clean, CleanReport, Cleaned, Cleaner, CleaningConfig};
pub use dates::{parse_date, MalformedDateError};
pub use zscore::zscore_keep_mask;
