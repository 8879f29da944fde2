use pqcbench_core::{ProcessedQuantumData, TimeRange, filter_by_algorithm, filter_by_time_range};

pub struct QuantumCommandConfig<'a> {
    pub store_path: &'a str,
    pub algorithm: &'a str,
    pub range: &'a str,
    pub output_path: Option<&'a str>,
    pub config_path: Option<&'a str>,
}

pub fn run(cfg: QuantumCommandConfig<'_>) {
    let heuristics = super::load_config(cfg.config_path);
    let data = super::load_data(cfg.store_path, heuristics.clone());
    let records = filter_by_time_range(
        &filter_by_algorithm(&data.quantum_data, cfg.algorithm),
        TimeRange::parse(cfg.range),
    );

    if records.is_empty() {
        println!(
            "No quantum runs match algorithm '{}' in range '{}'.",
            cfg.algorithm, cfg.range
        );
        return;
    }

    println!(
        "⚛️  {} quantum run(s) (algorithm: {}, range: {})\n",
        records.len(),
        cfg.algorithm,
        cfg.range
    );
    println!(
        "{:<12} {:<8} {:<16} {:>4} {:>7} {:>8} {:>11} {:>10}  {}",
        "Run", "Algo", "Backend", "Sim", "Shots", "Success", "Confidence", "Exec s", "Result"
    );
    println!("{}", "-".repeat(100));
    for record in &records {
        println!(
            "{:<12} {:<8} {:<16} {:>4} {:>7} {:>8.2} {:>11.4} {:>10}  {}",
            super::truncate(&record.run_id, 12),
            super::truncate(&record.algorithm, 8),
            super::truncate(record.backend_used.as_deref().unwrap_or("—"), 16),
            if pqcbench_core::quantum::is_simulator(record, &heuristics) {
                "yes"
            } else {
                "no"
            },
            super::cell(record.shots),
            record.success_rate,
            record.confidence,
            super::cell_f64(record.execution_time_sec, 2),
            outcome(record),
        );
    }

    if let Some(path) = cfg.output_path {
        super::write_json(path, &records);
    }
}

/// Short algorithm-specific result column.
fn outcome(record: &ProcessedQuantumData) -> String {
    if let Some(factors) = &record.factors {
        let joined: Vec<String> = factors.iter().map(u64::to_string).collect();
        let period = record
            .period
            .map(|r| format!(" (r={r})"))
            .unwrap_or_default();
        return format!("factors {}{period}", joined.join("×"));
    }
    if let Some(period) = record.period {
        return format!("r={period}");
    }
    if let Some(state) = &record.top_measured_state {
        let count = super::cell(record.top_measured_count);
        return format!("top |{state}⟩ ×{count}");
    }
    record
        .error_message
        .clone()
        .unwrap_or_else(|| "—".to_string())
}
