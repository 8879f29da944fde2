pub mod classical;
pub mod process;
pub mod quantum;
pub mod stats;

use std::fmt::Display;
use std::path::Path;

use pqcbench_core::{HeuristicConfig, JsonFileStore, Operation, Pipeline, ProcessedData};

/// Start env_logger. `RUST_LOG` wins; otherwise warn, or info with `--verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Heuristic config from a JSON file, or the defaults. Exits on a bad file.
pub fn load_config(path: Option<&str>) -> HeuristicConfig {
    let Some(path) = path else {
        return HeuristicConfig::default();
    };
    match pqcbench_core::load_config_from_path(Path::new(path)) {
        Ok(config) => {
            log::info!("using heuristic config from {path}");
            config
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Read and normalize a JSON run store. Exits when the store cannot be read.
pub fn load_data(store_path: &str, config: HeuristicConfig) -> ProcessedData {
    let store = JsonFileStore::new(store_path);
    match Pipeline::new(config).process(&store) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Parse `--operation`, exiting with the accepted names on a typo.
pub fn parse_operation(s: &str) -> Operation {
    match Operation::parse(s) {
        Some(op) => op,
        None => {
            let names: Vec<&str> = Operation::ALL.iter().map(Operation::as_str).collect();
            eprintln!("Error: unknown operation '{s}' (expected one of: {})", names.join(", "));
            std::process::exit(1);
        }
    }
}

/// Serialize `value` as pretty JSON to `path`.
pub fn write_json<T: serde::Serialize>(path: &str, value: &T) {
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: failed to serialize output: {e}");
            std::process::exit(1);
        }
    };
    match std::fs::write(path, json) {
        Ok(()) => println!("\nResults written to {path}"),
        Err(e) => {
            eprintln!("Error: failed to write {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Table cell for an optional value.
pub fn cell<T: Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "—".to_string())
}

/// Table cell for an optional float with fixed precision.
pub fn cell_f64(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_else(|| "—".to_string())
}

/// Cut `s` to at most `width` characters, marking the cut with `…`.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(1)).collect();
    format!("{kept}…")
}
