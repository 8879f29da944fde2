use pqcbench_core::{
    MetricField, Operation, ProcessedData, Statistics, calculate_statistics, summarize_operation,
    summarize_quantum,
};

/// Metric selectable with `--metric`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatsMetric {
    Benchmark(MetricField),
    Confidence,
    SuccessRate,
    ExecutionTimeSec,
}

impl StatsMetric {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "confidence" => Some(Self::Confidence),
            "success_rate" => Some(Self::SuccessRate),
            "execution_time_sec" => Some(Self::ExecutionTimeSec),
            other => MetricField::parse(other).map(Self::Benchmark),
        }
    }

    /// Every sample of this metric. Benchmark metrics may be limited to one
    /// operation; quantum runs without an execution time contribute nothing.
    fn values(&self, data: &ProcessedData, operation: Option<Operation>) -> Vec<f64> {
        match self {
            Self::Benchmark(field) => data
                .benchmark_data
                .iter()
                .flat_map(|r| r.operations.iter())
                .filter(|op| operation.is_none_or(|wanted| op.operation == wanted))
                .map(|op| field.value(op))
                .collect(),
            Self::Confidence => data.quantum_data.iter().map(|r| r.confidence).collect(),
            Self::SuccessRate => data.quantum_data.iter().map(|r| r.success_rate).collect(),
            Self::ExecutionTimeSec => data
                .quantum_data
                .iter()
                .filter_map(|r| r.execution_time_sec)
                .collect(),
        }
    }
}

pub fn run(store_path: &str, metric: &str, operation: Option<&str>, config_path: Option<&str>) {
    let Some(metric_kind) = StatsMetric::parse(metric) else {
        eprintln!("Error: unknown metric '{metric}'");
        std::process::exit(1);
    };
    let operation = operation.map(super::parse_operation);
    let data = super::load_data(store_path, super::load_config(config_path));

    let values = metric_kind.values(&data, operation);
    let scope = operation.map(|op| format!(" ({op})")).unwrap_or_default();
    println!("📊 {metric}{scope}: {} sample(s)\n", values.len());
    print_statistics(&calculate_statistics(&values));

    match metric_kind {
        StatsMetric::Benchmark(field) => {
            let operations: Vec<Operation> = match operation {
                Some(op) => vec![op],
                None => Operation::ALL.to_vec(),
            };
            for op in operations {
                let groups = summarize_operation(&data.benchmark_data, op);
                if groups.is_empty() {
                    continue;
                }
                println!("\n  {op}");
                println!(
                    "  {:<14} {:<16} {:>5} {:>12} {:>12} {:>12}",
                    "Algorithm", "Variant", "Runs", "Mean", "Median", "Std dev"
                );
                for g in &groups {
                    let s = match field {
                        MetricField::OpsPerSec => g.ops_per_sec,
                        MetricField::MemPeakKb => g.mem_peak_kb,
                        _ => g.avg_ms,
                    };
                    println!(
                        "  {:<14} {:<16} {:>5} {:>12.4} {:>12.4} {:>12.4}",
                        super::truncate(&g.algorithm, 14),
                        super::truncate(&g.variant, 16),
                        g.runs,
                        s.mean,
                        s.median,
                        s.std_dev
                    );
                }
            }
        }
        quantum => {
            let groups = summarize_quantum(&data.quantum_data);
            if groups.is_empty() {
                return;
            }
            println!(
                "\n  {:<10} {:<18} {:>5} {:>10} {:>10} {:>10}",
                "Algorithm", "Backend", "Runs", "Mean", "Median", "Std dev"
            );
            for g in &groups {
                let s = match quantum {
                    StatsMetric::SuccessRate => g.success_rate,
                    StatsMetric::ExecutionTimeSec => g.execution_time_sec,
                    _ => g.confidence,
                };
                println!(
                    "  {:<10} {:<18} {:>5} {:>10.4} {:>10.4} {:>10.4}",
                    super::truncate(&g.algorithm, 10),
                    super::truncate(&g.backend, 18),
                    g.runs,
                    s.mean,
                    s.median,
                    s.std_dev
                );
            }
        }
    }
}

fn print_statistics(s: &Statistics) {
    println!("  Mean:    {:.6}", s.mean);
    println!("  Median:  {:.6}", s.median);
    println!("  Std dev: {:.6}", s.std_dev);
    println!("  Min:     {:.6}", s.min);
    println!("  Max:     {:.6}", s.max);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqcbench_core::{
        ClassicalDetail, MemoryStore, OperationMetric, Pipeline, Run, RunStatus, RunType,
    };

    fn data() -> ProcessedData {
        let mut a = ClassicalDetail::new("a", "kyber");
        a.keygen = Some(OperationMetric::from_avg(2.0));
        a.encaps = Some(OperationMetric::from_avg(1.0));
        let mut b = ClassicalDetail::new("b", "kyber");
        b.keygen = Some(OperationMetric::from_avg(4.0));
        let run = |id: &str| {
            Run::new(
                id,
                "2026-01-01T00:00:00Z",
                RunType::ClassicalBenchmark,
                RunStatus::Completed,
            )
        };
        let store = MemoryStore::new(vec![run("a"), run("b")], vec![a, b], vec![]);
        Pipeline::default().process(&store).unwrap()
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!(
            StatsMetric::parse("ops_per_sec"),
            Some(StatsMetric::Benchmark(MetricField::OpsPerSec))
        );
        assert_eq!(StatsMetric::parse("confidence"), Some(StatsMetric::Confidence));
        assert_eq!(StatsMetric::parse("bogus"), None);
    }

    #[test]
    fn test_values_for_one_operation() {
        let metric = StatsMetric::Benchmark(MetricField::AvgMs);
        let values = metric.values(&data(), Some(Operation::KeyGen));
        assert_eq!(values, vec![2.0, 4.0]);
    }

    #[test]
    fn test_values_across_operations() {
        let metric = StatsMetric::Benchmark(MetricField::AvgMs);
        assert_eq!(metric.values(&data(), None).len(), 3);
    }

    #[test]
    fn test_quantum_metrics_on_classical_only_data_are_empty() {
        assert!(StatsMetric::Confidence.values(&data(), None).is_empty());
        assert!(StatsMetric::ExecutionTimeSec.values(&data(), None).is_empty());
    }
}
