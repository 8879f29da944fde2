//! Quantum run normalization and success evaluation.
//!
//! Each quantum [`Run`] is joined to its [`QuantumResult`]; every metric is
//! pulled out with the two-step lookup in [`crate::extract`], and a
//! `success_rate`/`confidence` pair is derived with the Shor or Grover
//! heuristics when the result carries a measurement histogram.

pub mod grover;
pub mod shor;

use std::collections::HashMap;

use crate::config::HeuristicConfig;
use crate::extract::{
    bool_field, counts_field, f64_field, str_field, string_list_field, u64_field, u64_list_field,
};
use crate::model::{ProcessedQuantumData, QuantumResult, Run, RunType};
use crate::observer::{LogObserver, PipelineObserver, SkipReason};

/// Success and confidence for one run. Both are 0 when nothing was measured.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scores {
    pub success_rate: f64,
    pub confidence: f64,
}

/// Normalize quantum runs with default heuristics, logging through [`LogObserver`].
pub fn normalize_quantum(runs: &[Run], results: &[QuantumResult]) -> Vec<ProcessedQuantumData> {
    normalize_quantum_with(runs, results, &HeuristicConfig::default(), &LogObserver)
}

/// Normalize quantum runs in input order. Runs without a stored result are
/// skipped; when several results share a run id the first one is used.
pub fn normalize_quantum_with(
    runs: &[Run],
    results: &[QuantumResult],
    config: &HeuristicConfig,
    observer: &dyn PipelineObserver,
) -> Vec<ProcessedQuantumData> {
    let by_id: HashMap<&str, &QuantumResult> =
        results.iter().rev().map(|r| (r.run_id.as_str(), r)).collect();

    runs.iter()
        .filter(|run| run.run_type.is_quantum())
        .filter_map(|run| {
            let Some(result) = by_id.get(run.run_id.as_str()) else {
                observer.record_skipped(&run.run_id, &SkipReason::NoQuantumResult);
                return None;
            };
            let record = evaluate(run, result, config);
            observer.quantum_scored(&record);
            Some(record)
        })
        .collect()
}

/// Build the processed record for one run/result pair.
pub fn evaluate(run: &Run, result: &QuantumResult, config: &HeuristicConfig) -> ProcessedQuantumData {
    let label = run.algorithm.clone().unwrap_or_default();
    let mut record = extract_record(run, result);

    match run.run_type {
        RunType::QuantumShor => {
            // Period and factors are only derived from a measured histogram.
            if let Some(counts) = record.raw_counts.as_ref().filter(|c| !c.is_empty()) {
                let (a, n) = shor_parameters(&label, &record);
                if n > 1 {
                    record.period = Some(shor::period(a, n, config.shor.max_period_search));
                }
                if record.factors.is_none() {
                    record.factors = shor::recover_factors(counts, a, n, &config.shor);
                }
            }
        }
        RunType::QuantumGrover => {
            if record.top_measured_state.is_none() {
                if let Some((state, count)) = record.raw_counts.as_ref().and_then(grover::top_state) {
                    record.top_measured_state = Some(state.to_string());
                    record.top_measured_count = record.top_measured_count.or(Some(count));
                }
            }
        }
        _ => {}
    }

    let scores = score(&run.run_type, &record, config);
    record.success_rate = scores.success_rate;
    record.confidence = scores.confidence;
    record
}

/// Success and confidence for an extracted record. Only Shor and Grover runs
/// with a non-empty histogram are scored.
///
/// Shor hardware scoring reads the period already stored on the record; a
/// record without one is scored against the degenerate period 1.
pub fn score(
    run_type: &RunType,
    record: &ProcessedQuantumData,
    config: &HeuristicConfig,
) -> Scores {
    let Some(counts) = record.raw_counts.as_ref().filter(|c| !c.is_empty()) else {
        return Scores::default();
    };
    let simulator = is_simulator(record, config);
    let shots = record.shots.unwrap_or(0);

    match run_type {
        RunType::QuantumShor => {
            let success_rate = if record.status.as_deref() == Some("success") {
                1.0
            } else {
                0.0
            };
            let confidence = if simulator {
                if shots > 0 { 1.0 } else { 0.0 }
            } else {
                shor::hardware_confidence(counts, record.period.unwrap_or(1), &config.shor)
            };
            Scores {
                success_rate,
                confidence: confidence.min(1.0),
            }
        }
        RunType::QuantumGrover => {
            if simulator && shots > 0 {
                return Scores {
                    success_rate: 1.0,
                    confidence: 1.0,
                };
            }
            let success_rate = if record.found_correct_state == Some(true) {
                1.0
            } else {
                0.0
            };
            let marked = record.input_marked_states.as_deref().unwrap_or(&[]);
            let confidence = grover::confidence(
                marked,
                counts,
                record.top_measured_count,
                record.shots,
                &config.grover,
            );
            Scores {
                success_rate,
                confidence: confidence.min(1.0),
            }
        }
        _ => Scores::default(),
    }
}

/// Simulator when the backend name carries a marker or the runner says it
/// did not use hardware.
pub fn is_simulator(record: &ProcessedQuantumData, config: &HeuristicConfig) -> bool {
    record
        .backend_used
        .as_deref()
        .is_some_and(|b| config.is_simulator_backend(b))
        || record.ran_on_hardware == Some(false)
}

/// `(a, N)` from the run label, then from the stored values, else 0.
fn shor_parameters(label: &str, record: &ProcessedQuantumData) -> (u64, u64) {
    let a = shor::parse_label_param(label, 'a')
        .or(record.a_value)
        .unwrap_or(0);
    let n = shor::parse_label_param(label, 'N')
        .or(record.n_value)
        .unwrap_or(0);
    (a, n)
}

fn relabel(run: &Run) -> String {
    match run.run_type {
        RunType::QuantumShor => "Shor".to_string(),
        RunType::QuantumGrover => "Grover".to_string(),
        _ => run.algorithm.clone().unwrap_or_default(),
    }
}

fn extract_record(run: &Run, r: &QuantumResult) -> ProcessedQuantumData {
    ProcessedQuantumData {
        run_id: run.run_id.clone(),
        timestamp: run.timestamp.clone(),
        algorithm: relabel(run),
        run_type: run.run_type.clone(),
        run_status: run.status.clone(),

        execution_time_sec: f64_field(r, "execution_time_sec"),
        qpu_time_sec: f64_field(r, "qpu_time_sec"),
        circuit_depth: u64_field(r, "circuit_depth"),
        cx_gate_count: u64_field(r, "cx_gate_count"),
        total_gate_count: u64_field(r, "total_gate_count"),
        backend_used: str_field(r, "backend_used"),
        shots: u64_field(r, "shots"),
        raw_counts: counts_field(r, "raw_counts"),
        plot_file_path: str_field(r, "plot_file_path"),
        job_id: str_field(r, "job_id"),
        ran_on_hardware: bool_field(r, "ran_on_hardware"),
        error_message: str_field(r, "error_message"),

        gate_error: f64_field(r, "gate_error"),
        readout_error: f64_field(r, "readout_error"),
        t1_time: f64_field(r, "t1_time"),
        t2_time: f64_field(r, "t2_time"),
        quantum_volume: f64_field(r, "quantum_volume"),

        n_value: u64_field(r, "n_value"),
        a_value: u64_field(r, "a_value"),
        factors: u64_list_field(r, "factors"),
        status: str_field(r, "status"),
        period: None,

        input_marked_states: string_list_field(r, "input_marked_states"),
        top_measured_state: str_field(r, "top_measured_state"),
        top_measured_count: u64_field(r, "top_measured_count"),
        found_correct_state: bool_field(r, "found_correct_state"),
        num_qubits: u64_field(r, "num_qubits"),

        success_rate: 0.0,
        confidence: 0.0,
    }
}
