//! Integration tests for pqcbench-core.
//!
//! These tests drive the full path:
//! JSON run store → pipeline → filters / statistics / table rows.

use pqcbench_core::{
    BenchmarkRow, CollectingObserver, HeuristicConfig, JsonFileStore, MetricField, Operation,
    Pipeline, ProcessedData, RunStore, SkipReason, TimeRange, calculate_statistics,
    filter_by_algorithm, filter_by_time_range_at, parse_timestamp, summarize_operation,
    summarize_quantum,
};
use serde_json::json;

fn store_document() -> serde_json::Value {
    json!({
        "runs": [
            {"runId": "c-aes", "timestamp": "2026-03-10T09:00:00Z", "runType": "ClassicalBenchmark",
             "status": "completed", "algorithm": "aes"},
            {"runId": "c-kyber-1", "timestamp": "2026-03-14T09:00:00Z", "runType": "ClassicalBenchmark",
             "status": "completed", "algorithm": "kyber", "securityParam": "768"},
            {"runId": "c-kyber-2", "timestamp": "2026-03-14T21:00:00Z", "runType": "ClassicalBenchmark",
             "status": "completed", "algorithm": "kyber", "securityParam": "768"},
            {"runId": "c-failed", "timestamp": "2026-03-14T22:00:00Z", "runType": "ClassicalBenchmark",
             "status": "failed", "algorithm": "rsa"},
            {"runId": "q-shor", "timestamp": "2026-03-14T10:00:00Z", "runType": "QuantumShor",
             "status": "completed", "algorithm": "Shor N=15 a=7"},
            {"runId": "q-grover", "timestamp": "2026-03-01T10:00:00Z", "runType": "QuantumGrover",
             "status": "completed", "algorithm": "Grover 3q"},
            {"runId": "q-orphan", "timestamp": "2026-03-14T10:00:00Z", "runType": "QuantumGrover",
             "status": "completed"}
        ],
        "classicalDetails": [
            {"runId": "c-aes", "mainAlgorithm": "aes", "iterations": 1000,
             "encryption": {"avg_ms": 0.02}, "decryption": {"avg_ms": 0.025, "mem_peak_kb": 12.0}},
            {"runId": "c-kyber-1", "mainAlgorithm": "kyber", "variant": "Kyber768",
             "keygen": {"avg_ms": 0.5}, "encaps": {"avg_ms": 0.25}, "decaps": {"avg_ms": 0.2}},
            {"runId": "c-kyber-2", "mainAlgorithm": "kyber", "variant": "Kyber768",
             "keygen": {"avg_ms": 1.5}, "encaps": {"avg_ms": 0.75}},
            {"runId": "c-failed", "mainAlgorithm": "rsa", "keygen": {"avg_ms": 80.0}},
            {"runId": "c-missing", "mainAlgorithm": "rsa", "keygen": {"avg_ms": 80.0}}
        ],
        "quantumResults": [
            {"runId": "q-shor", "backend_used": "ibm_kyiv", "shots": 100,
             "data": {
                 "status": "success",
                 "gate_error": 0.0012,
                 "raw_counts": {"00000000": 30, "01000000": 30, "00100000": 40}
             }},
            {"runId": "q-grover",
             "data": {
                 "backend_used": "ibm_brisbane",
                 "shots": 100,
                 "input_marked_states": ["101"],
                 "found_correct_state": true,
                 "raw_counts": {"100": 60, "011": 40}
             }}
        ]
    })
}

fn write_store(dir: &tempfile::TempDir) -> JsonFileStore {
    let path = dir.path().join("runs.json");
    std::fs::write(&path, serde_json::to_string_pretty(&store_document()).unwrap()).unwrap();
    JsonFileStore::new(path)
}

fn process(store: &dyn RunStore) -> ProcessedData {
    Pipeline::new(HeuristicConfig::default())
        .process(store)
        .expect("store should load")
}

#[test]
fn json_store_through_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let data = process(&write_store(&dir));

    let ids: Vec<&str> = data.benchmark_data.iter().map(|r| r.run_id.as_str()).collect();
    assert_eq!(ids, vec!["c-aes", "c-kyber-1", "c-kyber-2"]);

    let ids: Vec<&str> = data.quantum_data.iter().map(|r| r.run_id.as_str()).collect();
    assert_eq!(ids, vec!["q-shor", "q-grover"]);
}

#[test]
fn legacy_aes_record_gets_variant_and_security_param() {
    let dir = tempfile::tempdir().unwrap();
    let data = process(&write_store(&dir));
    let aes = &data.benchmark_data[0];
    assert_eq!(aes.variant, "AES-256");
    assert_eq!(aes.security_param, "256");
    assert_eq!(aes.iterations, 1000);

    let dec = aes.operation(Operation::Decryption).unwrap();
    assert_eq!(dec.mem_peak_kb, 12.0);
    assert_eq!(dec.mem_avg_kb, 12.0);
    assert_eq!(dec.min_ms, 0.025);
}

#[test]
fn shor_hardware_run_is_scored_from_peaks() {
    let dir = tempfile::tempdir().unwrap();
    let data = process(&write_store(&dir));
    let shor = &data.quantum_data[0];
    assert_eq!(shor.algorithm, "Shor");
    assert_eq!(shor.success_rate, 1.0);
    assert_eq!(shor.period, Some(4));
    // 30 + 30 of 100 shots land within tolerance of 0, 64, 128 or 192.
    assert!((shor.confidence - 0.6).abs() < 1e-12);
    assert_eq!(shor.gate_error, Some(0.0012));
    assert_eq!(shor.factors, Some(vec![3, 5]));
}

#[test]
fn grover_hardware_run_accepts_one_bit_flip() {
    let dir = tempfile::tempdir().unwrap();
    let data = process(&write_store(&dir));
    let grover = &data.quantum_data[1];
    assert_eq!(grover.algorithm, "Grover");
    assert_eq!(grover.backend_used.as_deref(), Some("ibm_brisbane"));
    assert_eq!(grover.success_rate, 1.0);
    assert!((grover.confidence - 0.6).abs() < 1e-12);
    assert_eq!(grover.top_measured_state.as_deref(), Some("100"));
    assert_eq!(grover.top_measured_count, Some(60));
}

#[test]
fn observer_reports_every_skip() {
    let dir = tempfile::tempdir().unwrap();
    let observer = CollectingObserver::new();
    Pipeline::default()
        .with_observer(&observer)
        .process(&write_store(&dir))
        .unwrap();
    assert_eq!(observer.skipped(), vec!["c-failed", "c-missing", "q-orphan"]);
    let reasons: Vec<SkipReason> = observer
        .events()
        .into_iter()
        .filter_map(|e| match e {
            pqcbench_core::ObserverEvent::Skipped { reason, .. } => Some(reason),
            _ => None,
        })
        .collect();
    assert_eq!(reasons[1], SkipReason::NoMatchingRun);
    assert_eq!(reasons[2], SkipReason::NoQuantumResult);
}

#[test]
fn refresh_on_missing_store_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("does-not-exist.json"));
    let data = Pipeline::default().refresh(&store);
    assert!(data.benchmark_data.is_empty());
    assert!(data.quantum_data.is_empty());
}

#[test]
fn refresh_on_corrupt_store_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.json");
    std::fs::write(&path, "{\"runs\": [").unwrap();
    let data = Pipeline::default().refresh(&JsonFileStore::new(path));
    assert_eq!(data, ProcessedData::default());
}

#[test]
fn filters_compose_over_processed_lists() {
    let dir = tempfile::tempdir().unwrap();
    let data = process(&write_store(&dir));
    let now = parse_timestamp("2026-03-15T09:00:00Z").unwrap();

    let kyber = filter_by_algorithm(&data.benchmark_data, "KYBER");
    assert_eq!(kyber.len(), 2);
    let last_day = filter_by_time_range_at(&kyber, TimeRange::Day, now);
    assert_eq!(last_day.len(), 2);
    let last_day_all = filter_by_time_range_at(&data.benchmark_data, TimeRange::Day, now);
    assert_eq!(last_day_all.len(), 2);
    let last_week = filter_by_time_range_at(&data.benchmark_data, TimeRange::Week, now);
    assert_eq!(last_week.len(), 3);

    let recent_quantum = filter_by_time_range_at(&data.quantum_data, TimeRange::Week, now);
    assert_eq!(recent_quantum.len(), 1);
    assert_eq!(recent_quantum[0].algorithm, "Shor");
    let grover = filter_by_algorithm(&data.quantum_data, "grover");
    assert_eq!(grover.len(), 1);
}

#[test]
fn statistics_and_rows_from_processed_data() {
    let dir = tempfile::tempdir().unwrap();
    let data = process(&write_store(&dir));

    let keygen = summarize_operation(&data.benchmark_data, Operation::KeyGen);
    assert_eq!(keygen.len(), 1);
    assert_eq!(keygen[0].variant, "Kyber768");
    assert_eq!(keygen[0].runs, 2);
    assert_eq!(keygen[0].avg_ms.mean, 1.0);

    let confidences: Vec<f64> = data.quantum_data.iter().map(|r| r.confidence).collect();
    let s = calculate_statistics(&confidences);
    assert!((s.mean - 0.6).abs() < 1e-12);

    assert_eq!(summarize_quantum(&data.quantum_data).len(), 2);

    let row = BenchmarkRow::from_record(&data.benchmark_data[1]);
    assert_eq!(row.get(Operation::Encapsulate, MetricField::OpsPerSec), Some(4000.0));
    assert_eq!(row.get(Operation::Decapsulate, MetricField::MaxMs), Some(0.2));
}
