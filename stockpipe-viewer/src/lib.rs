//! stockpipe viewer: terminal line chart of the stored daily Low prices.
//!
//! Reads `Date, Low` from the stored table, keeps the first value of each
//! calendar day, and draws it with ratatui.

pub mod app;
pub mod chart;
pub mod data_loader;
pub mod theme;

pub use app::App;
pub use data_loader::{load_daily_lows, ChartData};
