//! Classical / post-quantum benchmark normalization.
//!
//! Joins each [`ClassicalDetail`] to its completed [`Run`], backfills missing
//! operation metrics, and fills in variant and security-parameter labels for
//! legacy records that never stored them.

use std::collections::HashMap;

use crate::model::{
    ClassicalDetail, Operation, OperationMetric, ProcessedBenchmarkData, ProcessedOperation, Run,
    RunStatus,
};
use crate::observer::{LogObserver, PipelineObserver, SkipReason};

/// Variant label legacy AES records get.
pub const DEFAULT_AES_VARIANT: &str = "AES-256";
/// Curve assumed for ECDSA/ECDH records without one.
pub const DEFAULT_EC_CURVE: &str = "P-256";

/// Normalize classical details, logging skips through [`LogObserver`].
pub fn normalize_classical(runs: &[Run], details: &[ClassicalDetail]) -> Vec<ProcessedBenchmarkData> {
    normalize_classical_with(runs, details, &LogObserver)
}

/// Normalize classical details, reporting to the given observer.
///
/// Output follows the order of `details`. Details whose run is missing or not
/// completed produce nothing.
pub fn normalize_classical_with(
    runs: &[Run],
    details: &[ClassicalDetail],
    observer: &dyn PipelineObserver,
) -> Vec<ProcessedBenchmarkData> {
    let by_id: HashMap<&str, &Run> = runs.iter().map(|r| (r.run_id.as_str(), r)).collect();

    details
        .iter()
        .filter_map(|detail| {
            let Some(run) = by_id.get(detail.run_id.as_str()) else {
                observer.record_skipped(&detail.run_id, &SkipReason::NoMatchingRun);
                return None;
            };
            if run.status != RunStatus::Completed {
                observer.record_skipped(
                    &detail.run_id,
                    &SkipReason::NotCompleted(run.status.clone()),
                );
                return None;
            }
            let record = process_detail(run, detail);
            observer.benchmark_processed(&record);
            Some(record)
        })
        .collect()
}

/// Build the processed record for one joined run/detail pair.
pub fn process_detail(run: &Run, detail: &ClassicalDetail) -> ProcessedBenchmarkData {
    let algorithm = if !detail.main_algorithm.trim().is_empty() {
        detail.main_algorithm.clone()
    } else {
        run.algorithm.clone().unwrap_or_default()
    };

    let operations = detail
        .operation_blocks()
        .map(|(operation, block)| backfill(operation, block))
        .collect();

    ProcessedBenchmarkData {
        run_id: run.run_id.clone(),
        timestamp: run.timestamp.clone(),
        variant: infer_variant(&algorithm, detail.variant.as_deref(), detail.curve.as_deref()),
        security_param: run
            .security_param
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| default_security_param(&algorithm).to_string()),
        iterations: detail.iterations.or(run.iterations).unwrap_or(0),
        curve: detail.curve.clone(),
        sizes: detail.sizes.clone(),
        operations,
        notes: run.notes.clone(),
        algorithm,
    }
}

/// Populate every metric of an operation block.
///
/// Order: ops/sec from avg, peak memory from avg memory, avg memory from peak
/// memory, min/max from avg.
pub fn backfill(operation: Operation, m: &OperationMetric) -> ProcessedOperation {
    let avg_ms = m.avg_ms.unwrap_or(0.0);
    let ops_per_sec = m
        .ops_per_sec
        .unwrap_or(if avg_ms > 0.0 { 1000.0 / avg_ms } else { 0.0 });
    let mem_peak_kb = m.mem_peak_kb.or(m.mem_avg_kb).unwrap_or(0.0);
    let mem_avg_kb = m.mem_avg_kb.or(m.mem_peak_kb).unwrap_or(0.0);

    ProcessedOperation {
        operation,
        min_ms: m.min_ms.unwrap_or(avg_ms),
        max_ms: m.max_ms.unwrap_or(avg_ms),
        avg_ms,
        ops_per_sec,
        mem_peak_kb,
        mem_avg_kb,
    }
}

/// Variant label, inferred for AES and elliptic-curve records that lack one.
pub fn infer_variant(algorithm: &str, variant: Option<&str>, curve: Option<&str>) -> String {
    let stored = variant
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("unknown"));
    if let Some(v) = stored {
        return v.to_string();
    }
    match algorithm.to_ascii_lowercase().as_str() {
        "aes" => DEFAULT_AES_VARIANT.to_string(),
        "ecdsa" | "ecdh" => curve
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_EC_CURVE)
            .to_string(),
        _ => variant.unwrap_or_default().to_string(),
    }
}

/// Security parameter assumed when the run did not record one.
pub fn default_security_param(algorithm: &str) -> &'static str {
    match algorithm.to_ascii_lowercase().as_str() {
        "aes" => "256",
        "ecdsa" | "ecdh" => DEFAULT_EC_CURVE,
        "rsa" => "2048",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RunType;
    use crate::observer::{CollectingObserver, ObserverEvent};

    fn completed(id: &str) -> Run {
        Run::new(id, "2026-03-01T12:00:00Z", RunType::ClassicalBenchmark, RunStatus::Completed)
    }

    #[test]
    fn backfill_from_avg_only() {
        let op = backfill(Operation::Sign, &OperationMetric::from_avg(4.0));
        assert_eq!(op.ops_per_sec, 250.0);
        assert_eq!(op.min_ms, 4.0);
        assert_eq!(op.max_ms, 4.0);
        assert_eq!(op.mem_peak_kb, 0.0);
        assert_eq!(op.mem_avg_kb, 0.0);
    }

    #[test]
    fn backfill_keeps_stored_values() {
        let m = OperationMetric {
            min_ms: Some(0.5),
            max_ms: Some(2.5),
            avg_ms: Some(1.0),
            ops_per_sec: Some(900.0),
            mem_peak_kb: Some(64.0),
            mem_avg_kb: Some(32.0),
        };
        let op = backfill(Operation::KeyGen, &m);
        assert_eq!(op.ops_per_sec, 900.0);
        assert_eq!(op.min_ms, 0.5);
        assert_eq!(op.max_ms, 2.5);
        assert_eq!(op.mem_peak_kb, 64.0);
        assert_eq!(op.mem_avg_kb, 32.0);
    }

    #[test]
    fn backfill_memory_is_symmetric() {
        let peak_only = OperationMetric {
            avg_ms: Some(1.0),
            mem_peak_kb: Some(12.0),
            ..Default::default()
        };
        let op = backfill(Operation::Verify, &peak_only);
        assert_eq!(op.mem_avg_kb, 12.0);

        let avg_only = OperationMetric {
            avg_ms: Some(1.0),
            mem_avg_kb: Some(7.0),
            ..Default::default()
        };
        let op = backfill(Operation::Verify, &avg_only);
        assert_eq!(op.mem_peak_kb, 7.0);
    }

    #[test]
    fn backfill_zero_avg_guards_division() {
        let op = backfill(Operation::Encryption, &OperationMetric::default());
        assert_eq!(op.avg_ms, 0.0);
        assert_eq!(op.ops_per_sec, 0.0);
    }

    #[test]
    fn encaps_and_decaps_are_renamed() {
        let mut detail = ClassicalDetail::new("r1", "kyber");
        detail.encaps = Some(OperationMetric::from_avg(0.1));
        detail.decaps = Some(OperationMetric::from_avg(0.2));
        let out = normalize_classical_with(&[completed("r1")], &[detail], &CollectingObserver::new());
        let names: Vec<&str> = out[0].operations.iter().map(|o| o.operation.as_str()).collect();
        assert_eq!(names, vec!["encapsulate", "decapsulate"]);
    }

    #[test]
    fn detail_without_run_is_skipped() {
        let obs = CollectingObserver::new();
        let out = normalize_classical_with(
            &[completed("other")],
            &[ClassicalDetail::new("orphan", "kyber")],
            &obs,
        );
        assert!(out.is_empty());
        assert_eq!(
            obs.events(),
            vec![ObserverEvent::Skipped {
                run_id: "orphan".to_string(),
                reason: SkipReason::NoMatchingRun
            }]
        );
    }

    #[test]
    fn detail_with_incomplete_run_is_skipped() {
        let mut failed = completed("r1");
        failed.status = RunStatus::Failed;
        let mut running = completed("r2");
        running.status = RunStatus::Running;
        let out = normalize_classical(
            &[failed, running],
            &[ClassicalDetail::new("r1", "rsa"), ClassicalDetail::new("r2", "rsa")],
        );
        assert!(out.is_empty());
    }

    #[test]
    fn output_follows_detail_order() {
        let runs = vec![completed("a"), completed("b"), completed("c")];
        let details = vec![
            ClassicalDetail::new("c", "rsa"),
            ClassicalDetail::new("a", "aes"),
            ClassicalDetail::new("b", "dilithium"),
        ];
        let ids: Vec<String> = normalize_classical(&runs, &details)
            .into_iter()
            .map(|r| r.run_id)
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn variant_inference() {
        assert_eq!(infer_variant("aes", None, None), "AES-256");
        assert_eq!(infer_variant("AES", Some("unknown"), None), "AES-256");
        assert_eq!(infer_variant("aes", Some("AES-128"), None), "AES-128");
        assert_eq!(infer_variant("ecdsa", None, Some("P-384")), "P-384");
        assert_eq!(infer_variant("ecdh", Some("Unknown"), None), "P-256");
        assert_eq!(infer_variant("kyber", Some("Kyber768"), None), "Kyber768");
        assert_eq!(infer_variant("kyber", None, None), "");
    }

    #[test]
    fn security_param_defaults() {
        assert_eq!(default_security_param("aes"), "256");
        assert_eq!(default_security_param("ECDSA"), "P-256");
        assert_eq!(default_security_param("ecdh"), "P-256");
        assert_eq!(default_security_param("rsa"), "2048");
        assert_eq!(default_security_param("kyber"), "");
    }

    #[test]
    fn run_security_param_wins_over_default() {
        let run = completed("r1").with_security_param("4096");
        let out = process_detail(&run, &ClassicalDetail::new("r1", "rsa"));
        assert_eq!(out.security_param, "4096");

        let out = process_detail(&completed("r2"), &ClassicalDetail::new("r2", "rsa"));
        assert_eq!(out.security_param, "2048");
    }

    #[test]
    fn algorithm_and_iterations_fall_back_to_run() {
        let mut run = completed("r1").with_algorithm("falcon");
        run.iterations = Some(500);
        let out = process_detail(&run, &ClassicalDetail::new("r1", ""));
        assert_eq!(out.algorithm, "falcon");
        assert_eq!(out.iterations, 500);
    }
}
