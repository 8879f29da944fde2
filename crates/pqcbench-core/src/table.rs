//! Flat table rows for benchmark records.
//!
//! Each processed operation contributes one column per metric, keyed by the
//! `(Operation, MetricField)` pair and rendered as `<operation>_<metric>`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Operation, ProcessedBenchmarkData, ProcessedOperation};

/// Per-operation metric carried in a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    MinMs,
    MaxMs,
    AvgMs,
    OpsPerSec,
    MemPeakKb,
    MemAvgKb,
}

impl MetricField {
    pub const ALL: [MetricField; 6] = [
        MetricField::MinMs,
        MetricField::MaxMs,
        MetricField::AvgMs,
        MetricField::OpsPerSec,
        MetricField::MemPeakKb,
        MetricField::MemAvgKb,
    ];

    /// Column suffix.
    pub fn suffix(&self) -> &'static str {
        match self {
            MetricField::MinMs => "min_ms",
            MetricField::MaxMs => "max_ms",
            MetricField::AvgMs => "avg_ms",
            MetricField::OpsPerSec => "ops_per_sec",
            MetricField::MemPeakKb => "mem_peak_kb",
            MetricField::MemAvgKb => "mem_avg_kb",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| m.suffix() == s)
    }

    /// Read this metric from a processed operation.
    pub fn value(&self, op: &ProcessedOperation) -> f64 {
        match self {
            MetricField::MinMs => op.min_ms,
            MetricField::MaxMs => op.max_ms,
            MetricField::AvgMs => op.avg_ms,
            MetricField::OpsPerSec => op.ops_per_sec,
            MetricField::MemPeakKb => op.mem_peak_kb,
            MetricField::MemAvgKb => op.mem_avg_kb,
        }
    }
}

impl fmt::Display for MetricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BenchmarkColumn {
    pub operation: Operation,
    pub metric: MetricField,
}

impl BenchmarkColumn {
    pub fn new(operation: Operation, metric: MetricField) -> Self {
        Self { operation, metric }
    }

    /// Column name, e.g. `keygen_avg_ms`.
    pub fn key(&self) -> String {
        format!("{}_{}", self.operation.as_str(), self.metric.suffix())
    }
}

/// One benchmark record flattened for tabular display.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRow {
    pub run_id: String,
    pub timestamp: String,
    pub algorithm: String,
    pub variant: String,
    pub security_param: String,
    pub iterations: u64,
    pub values: BTreeMap<BenchmarkColumn, f64>,
}

impl BenchmarkRow {
    pub fn from_record(record: &ProcessedBenchmarkData) -> Self {
        let values = record
            .operations
            .iter()
            .flat_map(|op| {
                MetricField::ALL
                    .into_iter()
                    .map(move |metric| (BenchmarkColumn::new(op.operation, metric), metric.value(op)))
            })
            .collect();
        Self {
            run_id: record.run_id.clone(),
            timestamp: record.timestamp.clone(),
            algorithm: record.algorithm.clone(),
            variant: record.variant.clone(),
            security_param: record.security_param.clone(),
            iterations: record.iterations,
            values,
        }
    }

    pub fn get(&self, operation: Operation, metric: MetricField) -> Option<f64> {
        self.values
            .get(&BenchmarkColumn::new(operation, metric))
            .copied()
    }

    /// Columns present in this row, in operation then metric order.
    pub fn columns(&self) -> impl Iterator<Item = &BenchmarkColumn> {
        self.values.keys()
    }

    /// Row as a JSON object with identity fields and `<op>_<metric>` keys.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        map.insert("run_id".into(), self.run_id.clone().into());
        map.insert("timestamp".into(), self.timestamp.clone().into());
        map.insert("algorithm".into(), self.algorithm.clone().into());
        map.insert("variant".into(), self.variant.clone().into());
        map.insert("security_param".into(), self.security_param.clone().into());
        map.insert("iterations".into(), self.iterations.into());
        for (column, value) in &self.values {
            map.insert(column.key(), (*value).into());
        }
        serde_json::Value::Object(map)
    }
}
