//! # pqcbench-core
//!
//! **Flat, comparable numbers out of messy benchmark runs.**
//!
//! `pqcbench-core` normalizes stored post-quantum and classical cryptography
//! benchmarks and Shor/Grover quantum jobs into render-ready records, and
//! derives success/confidence scores for the quantum runs from their
//! measurement histograms.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pqcbench_core::{JsonFileStore, Pipeline, TimeRange, filter_by_time_range};
//!
//! let store = JsonFileStore::new("runs.json");
//! let data = Pipeline::default().refresh(&store);
//!
//! let recent = filter_by_time_range(&data.quantum_data, TimeRange::Week);
//! for run in &recent {
//!     println!("{} {}: confidence {:.2}", run.run_id, run.algorithm, run.confidence);
//! }
//! ```
//!
//! ## Architecture
//!
//! RunStore → Classical Normalizer → `Vec<ProcessedBenchmarkData>`
//! RunStore → Quantum Normalizer + Success Evaluator → `Vec<ProcessedQuantumData>`
//!
//! Both lists feed the filters in [`filter`], the statistics in [`stats`] and
//! the flat rows in [`table`]. Quantum fields are looked up at the top level of
//! a stored result first and under its `data` object second
//! (see [`extract`]).

pub mod classical;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod model;
pub mod observer;
pub mod pipeline;
pub mod quantum;
pub mod stats;
pub mod store;
pub mod table;

pub use classical::{normalize_classical, normalize_classical_with};
pub use config::{GroverConfig, HeuristicConfig, ShorConfig, load_config_from_path};
pub use error::{ConfigError, StoreError};
pub use filter::{
    TimeRange, filter_by_algorithm, filter_by_time_range, filter_by_time_range_at,
    parse_timestamp,
};
pub use model::{
    ClassicalDetail, KeySizes, Operation, OperationMetric, ProcessedBenchmarkData,
    ProcessedOperation, ProcessedQuantumData, QuantumResult, Run, RunRecord, RunStatus, RunType,
};
pub use observer::{
    CollectingObserver, LogObserver, NoopObserver, ObserverEvent, PipelineObserver, SkipReason,
};
pub use pipeline::{Pipeline, ProcessedData};
pub use quantum::{Scores, normalize_quantum, normalize_quantum_with};
pub use stats::{
    OperationSummary, QuantumSummary, Statistics, calculate_statistics, summarize_operation,
    summarize_quantum,
};
pub use store::{JsonFileStore, MemoryStore, RunStore, StoreSnapshot};
pub use table::{BenchmarkColumn, BenchmarkRow, MetricField};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
