pub fn run(store_path: &str, output_path: &str, config_path: Option<&str>) {
    let data = super::load_data(store_path, super::load_config(config_path));
    println!(
        "Processed {} benchmark and {} quantum record(s) from {store_path}",
        data.benchmark_data.len(),
        data.quantum_data.len()
    );
    super::write_json(output_path, &data);
}
