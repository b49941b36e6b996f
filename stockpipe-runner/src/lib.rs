//! stockpipe runner: configuration, ingestion, storage, orchestration.
//!
//! This crate builds on `stockpipe-core` to provide:
//! - TOML pipeline configuration with validation
//! - Header-driven CSV ingestion into a `RawTable`
//! - SQLite store with full-replace writes and a read contract for viewers
//! - The pipeline runner and its serializable run summary

pub mod config;
pub mod ingest;
pub mod pipeline;
pub mod store;

pub use config::{ConfigError, InputConfig, PipelineConfig, StoreConfig};
pub use ingest::{read_csv, read_csv_from, IngestError};
pub use pipeline::{
    compute_dataset_hash, inspect, process, run, run_with_sink, PipelineError, Processed,
    RunSummary, SCHEMA_VERSION,
};
pub use store::{SqliteStore, StoreError, TableSink, TIMESTAMP_FORMAT};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_is_send_sync() {
        assert_send::<PipelineConfig>();
        assert_sync::<PipelineConfig>();
    }

    #[test]
    fn errors_are_send_sync() {
        assert_send::<PipelineError>();
        assert_sync::<PipelineError>();
    }

    #[test]
    fn summary_and_store_are_send_sync() {
        assert_send::<RunSummary>();
        assert_sync::<RunSummary>();
        assert_send::<SqliteStore>();
        assert_sync::<SqliteStore>();
    }
}
