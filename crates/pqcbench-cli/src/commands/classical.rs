use pqcbench_core::{
    BenchmarkRow, HeuristicConfig, MetricField, ProcessedBenchmarkData, TimeRange,
    filter_by_algorithm, filter_by_time_range,
};

pub struct ClassicalCommandConfig<'a> {
    pub store_path: &'a str,
    pub algorithm: &'a str,
    pub range: &'a str,
    pub output_path: Option<&'a str>,
}

pub fn run(cfg: ClassicalCommandConfig<'_>) {
    let data = super::load_data(cfg.store_path, HeuristicConfig::default());
    let records = select(&data.benchmark_data, cfg.algorithm, TimeRange::parse(cfg.range));

    if records.is_empty() {
        println!(
            "No completed classical benchmarks match algorithm '{}' in range '{}'.",
            cfg.algorithm, cfg.range
        );
        return;
    }

    println!(
        "🔐 {} benchmark run(s) (algorithm: {}, range: {})\n",
        records.len(),
        cfg.algorithm,
        cfg.range
    );
    print_table(&records);

    if let Some(path) = cfg.output_path {
        let rows: Vec<serde_json::Value> = records
            .iter()
            .map(|r| BenchmarkRow::from_record(r).to_json())
            .collect();
        super::write_json(path, &rows);
    }
}

fn select(
    records: &[ProcessedBenchmarkData],
    algorithm: &str,
    range: TimeRange,
) -> Vec<ProcessedBenchmarkData> {
    filter_by_time_range(&filter_by_algorithm(records, algorithm), range)
}

fn print_table(records: &[ProcessedBenchmarkData]) {
    println!(
        "{:<12} {:<14} {:<10} {:<14} {:>10} {:>12} {:>12}",
        "Run", "Variant", "Param", "Operation", "Avg ms", "Ops/sec", "Peak KB"
    );
    println!("{}", "-".repeat(90));

    for record in records {
        let row = BenchmarkRow::from_record(record);
        if record.operations.is_empty() {
            println!(
                "{:<12} {:<14} {:<10} {:<14}",
                super::truncate(&record.run_id, 12),
                super::truncate(&record.variant, 14),
                super::truncate(&record.security_param, 10),
                "(no operations)"
            );
            continue;
        }
        for (i, op) in record.operations.iter().enumerate() {
            let (run, variant, param) = if i == 0 {
                (
                    super::truncate(&record.run_id, 12),
                    super::truncate(&record.variant, 14),
                    super::truncate(&record.security_param, 10),
                )
            } else {
                (String::new(), String::new(), String::new())
            };
            println!(
                "{:<12} {:<14} {:<10} {:<14} {:>10} {:>12} {:>12}",
                run,
                variant,
                param,
                op.operation.as_str(),
                super::cell_f64(row.get(op.operation, MetricField::AvgMs), 4),
                super::cell_f64(row.get(op.operation, MetricField::OpsPerSec), 1),
                super::cell_f64(row.get(op.operation, MetricField::MemPeakKb), 1),
            );
        }
    }
}
