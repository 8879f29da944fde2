//! Store → normalizers → processed lists, in one call.

use serde::{Deserialize, Serialize};

use crate::classical::normalize_classical_with;
use crate::config::HeuristicConfig;
use crate::error::StoreError;
use crate::model::{ProcessedBenchmarkData, ProcessedQuantumData};
use crate::observer::{LogObserver, PipelineObserver};
use crate::quantum::normalize_quantum_with;
use crate::store::{RunStore, StoreSnapshot};

/// Both processed lists, as handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedData {
    pub benchmark_data: Vec<ProcessedBenchmarkData>,
    pub quantum_data: Vec<ProcessedQuantumData>,
}

impl ProcessedData {
    pub fn is_empty(&self) -> bool {
        self.benchmark_data.is_empty() && self.quantum_data.is_empty()
    }
}

/// Reads a store once and normalizes everything in it.
pub struct Pipeline<'a> {
    config: HeuristicConfig,
    observer: &'a dyn PipelineObserver,
}

impl Default for Pipeline<'_> {
    fn default() -> Self {
        Self::new(HeuristicConfig::default())
    }
}

impl<'a> Pipeline<'a> {
    /// Pipeline that reports through [`LogObserver`].
    pub fn new(config: HeuristicConfig) -> Self {
        Self {
            config,
            observer: &LogObserver,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn PipelineObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Take one [`RunStore::snapshot`] and run both normalizers over it.
    /// A read error aborts.
    pub fn process(&self, store: &dyn RunStore) -> Result<ProcessedData, StoreError> {
        let StoreSnapshot {
            runs,
            classical_details,
            quantum_results,
        } = store.snapshot()?;

        let benchmark_data = normalize_classical_with(&runs, &classical_details, self.observer);
        let quantum_data =
            normalize_quantum_with(&runs, &quantum_results, &self.config, self.observer);
        log::info!(
            "processed {} benchmark and {} quantum records from {} runs",
            benchmark_data.len(),
            quantum_data.len(),
            runs.len()
        );
        Ok(ProcessedData {
            benchmark_data,
            quantum_data,
        })
    }

    /// Like [`Pipeline::process`], but a failed read yields two empty lists.
    pub fn refresh(&self, store: &dyn RunStore) -> ProcessedData {
        self.process(store).unwrap_or_else(|e| {
            log::warn!("run store read failed, returning no data: {e}");
            ProcessedData::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassicalDetail, OperationMetric, QuantumResult, Run, RunStatus, RunType};
    use crate::observer::{CollectingObserver, ObserverEvent};
    use crate::store::MemoryStore;
    use serde_json::json;

    struct FailingStore;

    impl RunStore for FailingStore {
        fn get_all_runs(&self) -> Result<Vec<Run>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
        fn get_all_classical_details(&self) -> Result<Vec<ClassicalDetail>, StoreError> {
            Ok(vec![])
        }
        fn get_all_quantum_results(&self) -> Result<Vec<QuantumResult>, StoreError> {
            Ok(vec![])
        }
    }

    /// Getters fail; only a whole-store read succeeds.
    struct SnapshotOnlyStore(StoreSnapshot);

    impl RunStore for SnapshotOnlyStore {
        fn get_all_runs(&self) -> Result<Vec<Run>, StoreError> {
            Err(StoreError::Unavailable("per-collection reads disabled".into()))
        }
        fn get_all_classical_details(&self) -> Result<Vec<ClassicalDetail>, StoreError> {
            Err(StoreError::Unavailable("per-collection reads disabled".into()))
        }
        fn get_all_quantum_results(&self) -> Result<Vec<QuantumResult>, StoreError> {
            Err(StoreError::Unavailable("per-collection reads disabled".into()))
        }
        fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
            Ok(self.0.clone())
        }
    }

    fn store() -> MemoryStore {
        let mut detail = ClassicalDetail::new("c1", "kyber");
        detail.keygen = Some(OperationMetric::from_avg(0.5));
        MemoryStore::new(
            vec![
                Run::new(
                    "c1",
                    "2026-01-01T00:00:00Z",
                    RunType::ClassicalBenchmark,
                    RunStatus::Completed,
                ),
                Run::new(
                    "c2",
                    "2026-01-01T00:00:00Z",
                    RunType::ClassicalBenchmark,
                    RunStatus::Failed,
                ),
                Run::new(
                    "g1",
                    "2026-01-02T00:00:00Z",
                    RunType::QuantumGrover,
                    RunStatus::Completed,
                ),
            ],
            vec![detail, ClassicalDetail::new("c2", "rsa")],
            vec![QuantumResult::new("g1")
                .with_field("backend_used", json!("aer_simulator"))
                .with_data_field("shots", json!(100))
                .with_data_field("raw_counts", json!({"11": 90, "00": 10}))],
        )
    }

    #[test]
    fn process_runs_both_normalizers() {
        let data = Pipeline::default().process(&store()).unwrap();
        assert_eq!(data.benchmark_data.len(), 1);
        assert_eq!(data.benchmark_data[0].run_id, "c1");
        assert_eq!(data.quantum_data.len(), 1);
        assert_eq!(data.quantum_data[0].algorithm, "Grover");
        assert_eq!(data.quantum_data[0].confidence, 1.0);
    }

    #[test]
    fn observer_sees_skips_and_records() {
        let observer = CollectingObserver::new();
        Pipeline::default()
            .with_observer(&observer)
            .process(&store())
            .unwrap();
        assert_eq!(observer.skipped(), vec!["c2".to_string()]);
        assert!(observer
            .events()
            .iter()
            .any(|e| matches!(e, ObserverEvent::Quantum { run_id, .. } if run_id == "g1")));
    }

    #[test]
    fn process_reads_one_snapshot() {
        let snapshot = store().snapshot().unwrap();
        let data = Pipeline::default()
            .process(&SnapshotOnlyStore(snapshot))
            .unwrap();
        assert_eq!(data, Pipeline::default().process(&store()).unwrap());
        assert_eq!(data.benchmark_data.len(), 1);
        assert_eq!(data.quantum_data.len(), 1);
    }

    #[test]
    fn process_propagates_store_errors() {
        let err = Pipeline::default().process(&FailingStore).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[test]
    fn refresh_yields_empty_lists_on_failure() {
        let data = Pipeline::default().refresh(&FailingStore);
        assert!(data.is_empty());
        assert_eq!(data, ProcessedData::default());
    }

    #[test]
    fn processed_data_serializes_camel_case() {
        let json = serde_json::to_value(ProcessedData::default()).unwrap();
        assert!(json.get("benchmarkData").is_some());
        assert!(json.get("quantumData").is_some());
    }
}
