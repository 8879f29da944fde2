//! Summary statistics over processed records.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics as _;

use crate::model::{Operation, ProcessedBenchmarkData, ProcessedQuantumData};

/// Mean, median, population standard deviation and range of a sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Summary statistics. Empty input yields all zeros.
pub fn calculate_statistics(values: &[f64]) -> Statistics {
    if values.is_empty() {
        return Statistics::default();
    }
    Statistics {
        mean: values.iter().mean(),
        median: median(values),
        std_dev: values.iter().population_std_dev(),
        min: statrs::statistics::Statistics::min(values.iter()),
        max: statrs::statistics::Statistics::max(values.iter()),
    }
}

fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Statistics for one operation of one algorithm variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationSummary {
    pub algorithm: String,
    pub variant: String,
    pub operation: Operation,
    pub runs: usize,
    pub avg_ms: Statistics,
    pub ops_per_sec: Statistics,
    pub mem_peak_kb: Statistics,
}

/// Group benchmark records by `(algorithm, variant)` and summarize one
/// operation. Records without that operation are ignored. Groups come out
/// sorted by algorithm then variant.
pub fn summarize_operation(
    records: &[ProcessedBenchmarkData],
    operation: Operation,
) -> Vec<OperationSummary> {
    let groups = records
        .iter()
        .filter_map(|r| r.operation(operation).map(|op| (r, op)))
        .fold(BTreeMap::new(), |mut acc: BTreeMap<(String, String), Vec<_>>, (r, op)| {
            acc.entry((r.algorithm.clone(), r.variant.clone()))
                .or_default()
                .push(op);
            acc
        });

    groups
        .into_iter()
        .map(|((algorithm, variant), ops)| {
            let avg_ms: Vec<f64> = ops.iter().map(|o| o.avg_ms).collect();
            let ops_per_sec: Vec<f64> = ops.iter().map(|o| o.ops_per_sec).collect();
            let mem_peak_kb: Vec<f64> = ops.iter().map(|o| o.mem_peak_kb).collect();
            OperationSummary {
                algorithm,
                variant,
                operation,
                runs: ops.len(),
                avg_ms: calculate_statistics(&avg_ms),
                ops_per_sec: calculate_statistics(&ops_per_sec),
                mem_peak_kb: calculate_statistics(&mem_peak_kb),
            }
        })
        .collect()
}

/// Statistics for one quantum algorithm on one backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumSummary {
    pub algorithm: String,
    pub backend: String,
    pub runs: usize,
    pub success_rate: Statistics,
    pub confidence: Statistics,
    pub execution_time_sec: Statistics,
}

/// Backend label used when a record has none.
pub const UNKNOWN_BACKEND: &str = "unknown";

/// Group quantum records by `(algorithm, backend)`.
pub fn summarize_quantum(records: &[ProcessedQuantumData]) -> Vec<QuantumSummary> {
    let groups = records.iter().fold(
        BTreeMap::new(),
        |mut acc: BTreeMap<(String, String), Vec<&ProcessedQuantumData>>, r| {
            let backend = r
                .backend_used
                .clone()
                .unwrap_or_else(|| UNKNOWN_BACKEND.to_string());
            acc.entry((r.algorithm.clone(), backend)).or_default().push(r);
            acc
        },
    );

    groups
        .into_iter()
        .map(|((algorithm, backend), rs)| {
            let success: Vec<f64> = rs.iter().map(|r| r.success_rate).collect();
            let confidence: Vec<f64> = rs.iter().map(|r| r.confidence).collect();
            let exec: Vec<f64> = rs.iter().filter_map(|r| r.execution_time_sec).collect();
            QuantumSummary {
                algorithm,
                backend,
                runs: rs.len(),
                success_rate: calculate_statistics(&success),
                confidence: calculate_statistics(&confidence),
                execution_time_sec: calculate_statistics(&exec),
            }
        })
        .collect()
}
