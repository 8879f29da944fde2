//! Injectable hooks for watching the normalizers work.
//!
//! Normalizers are pure; anything they want to report goes through a
//! [`PipelineObserver`]. The default [`LogObserver`] forwards to the `log`
//! facade, tests use [`CollectingObserver`].

use std::cell::RefCell;
use std::fmt;

use crate::model::{ProcessedBenchmarkData, ProcessedQuantumData, RunStatus};

/// Why a record produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// A classical detail references a run id the store does not have.
    NoMatchingRun,
    /// The owning run exists but has not completed.
    NotCompleted(RunStatus),
    /// A quantum run has no stored result.
    NoQuantumResult,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoMatchingRun => write!(f, "no matching run"),
            SkipReason::NotCompleted(status) => write!(f, "run status is {status}"),
            SkipReason::NoQuantumResult => write!(f, "no quantum result"),
        }
    }
}

/// Receives events from the normalizers. All methods default to no-ops.
pub trait PipelineObserver {
    fn record_skipped(&self, _run_id: &str, _reason: &SkipReason) {}
    fn benchmark_processed(&self, _record: &ProcessedBenchmarkData) {}
    fn quantum_scored(&self, _record: &ProcessedQuantumData) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Forwards events to `log` at debug/trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn record_skipped(&self, run_id: &str, reason: &SkipReason) {
        log::debug!("skipping run {run_id}: {reason}");
    }

    fn benchmark_processed(&self, record: &ProcessedBenchmarkData) {
        log::trace!(
            "benchmark {} ({} {}): {} operation(s)",
            record.run_id,
            record.algorithm,
            record.variant,
            record.operations.len()
        );
    }

    fn quantum_scored(&self, record: &ProcessedQuantumData) {
        log::debug!(
            "quantum {} ({} on {}): success={:.2} confidence={:.4}",
            record.run_id,
            record.algorithm,
            record.backend_used.as_deref().unwrap_or("unknown backend"),
            record.success_rate,
            record.confidence
        );
    }
}

/// One observed event, as captured by [`CollectingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum ObserverEvent {
    Skipped { run_id: String, reason: SkipReason },
    Benchmark { run_id: String },
    Quantum { run_id: String, success_rate: f64, confidence: f64 },
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: RefCell<Vec<ObserverEvent>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.borrow().clone()
    }

    /// Run ids that were skipped, in order.
    pub fn skipped(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ObserverEvent::Skipped { run_id, .. } => Some(run_id.clone()),
                _ => None,
            })
            .collect()
    }
}

impl PipelineObserver for CollectingObserver {
    fn record_skipped(&self, run_id: &str, reason: &SkipReason) {
        self.events.borrow_mut().push(ObserverEvent::Skipped {
            run_id: run_id.to_string(),
            reason: reason.clone(),
        });
    }

    fn benchmark_processed(&self, record: &ProcessedBenchmarkData) {
        self.events.borrow_mut().push(ObserverEvent::Benchmark {
            run_id: record.run_id.clone(),
        });
    }

    fn quantum_scored(&self, record: &ProcessedQuantumData) {
        self.events.borrow_mut().push(ObserverEvent::Quantum {
            run_id: record.run_id.clone(),
            success_rate: record.success_rate,
            confidence: record.confidence,
        });
    }
}
