//! CLI for pqcbench — normalize, score and summarize benchmark run stores.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pqcbench")]
#[command(about = "pqcbench — flat, comparable numbers out of PQC, classical and quantum benchmark runs")]
#[command(version = pqcbench_core::VERSION)]
struct Cli {
    /// Log pipeline progress (info level). RUST_LOG overrides.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print normalized classical/PQC benchmarks as an operation table
    Classical {
        /// Path to the JSON run store
        #[arg(long)]
        store: String,

        /// Algorithm name (case-insensitive), or "all"
        #[arg(long, default_value = "all")]
        algorithm: String,

        /// Time window: day, week, month or all
        #[arg(long, default_value = "all", value_parser = ["day", "week", "month", "all"])]
        range: String,

        /// Write the flattened rows as JSON
        #[arg(long)]
        output: Option<String>,
    },

    /// Print quantum runs with success rate and confidence
    Quantum {
        /// Path to the JSON run store
        #[arg(long)]
        store: String,

        /// Algorithm name (Shor, Grover, ...), or "all"
        #[arg(long, default_value = "all")]
        algorithm: String,

        /// Time window: day, week, month or all
        #[arg(long, default_value = "all", value_parser = ["day", "week", "month", "all"])]
        range: String,

        /// Write the scored records as JSON
        #[arg(long)]
        output: Option<String>,

        /// Heuristic config JSON (tolerances, simulator markers)
        #[arg(long)]
        config: Option<String>,
    },

    /// Summary statistics for one metric, overall and per group
    Stats {
        /// Path to the JSON run store
        #[arg(long)]
        store: String,

        /// Metric to summarize
        #[arg(long, default_value = "avg_ms", value_parser = [
            "avg_ms", "ops_per_sec", "mem_peak_kb",
            "confidence", "success_rate", "execution_time_sec",
        ])]
        metric: String,

        /// Restrict benchmark metrics to one operation (keygen, sign, encaps, ...)
        #[arg(long)]
        operation: Option<String>,

        /// Heuristic config JSON (tolerances, simulator markers)
        #[arg(long)]
        config: Option<String>,
    },

    /// Write both processed lists as one JSON document
    Process {
        /// Path to the JSON run store
        #[arg(long)]
        store: String,

        /// Output JSON path
        #[arg(long)]
        output: String,

        /// Heuristic config JSON (tolerances, simulator markers)
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    match cli.command {
        Commands::Classical {
            store,
            algorithm,
            range,
            output,
        } => commands::classical::run(commands::classical::ClassicalCommandConfig {
            store_path: &store,
            algorithm: &algorithm,
            range: &range,
            output_path: output.as_deref(),
        }),
        Commands::Quantum {
            store,
            algorithm,
            range,
            output,
            config,
        } => commands::quantum::run(commands::quantum::QuantumCommandConfig {
            store_path: &store,
            algorithm: &algorithm,
            range: &range,
            output_path: output.as_deref(),
            config_path: config.as_deref(),
        }),
        Commands::Stats {
            store,
            metric,
            operation,
            config,
        } => commands::stats::run(&store, &metric, operation.as_deref(), config.as_deref()),
        Commands::Process {
            store,
            output,
            config,
        } => commands::process::run(&store, &output, config.as_deref()),
    }
}
