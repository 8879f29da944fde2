//! Run store records and the processed, render-ready records built from them.
//!
//! Input records (`Run`, `ClassicalDetail`, `QuantumResult`) mirror what the
//! dashboard's local datastore holds. They are tolerant on the way in: most
//! fields are optional, enum-like labels keep unknown values, and quantum
//! results stay an open JSON object because fields may sit at top level or
//! under `data`.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Which detail table a run owns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunType {
    ClassicalBenchmark,
    QuantumShor,
    QuantumGrover,
    /// Any label the store holds that is not one of the known kinds.
    Other(String),
}

impl RunType {
    pub fn as_str(&self) -> &str {
        match self {
            RunType::ClassicalBenchmark => "ClassicalBenchmark",
            RunType::QuantumShor => "QuantumShor",
            RunType::QuantumGrover => "QuantumGrover",
            RunType::Other(s) => s,
        }
    }

    /// True when the label carries the quantum prefix.
    pub fn is_quantum(&self) -> bool {
        match self {
            RunType::QuantumShor | RunType::QuantumGrover => true,
            RunType::ClassicalBenchmark => false,
            RunType::Other(s) => s.to_ascii_lowercase().starts_with("quantum"),
        }
    }
}

impl From<String> for RunType {
    fn from(s: String) -> Self {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "classicalbenchmark" => RunType::ClassicalBenchmark,
            "quantumshor" => RunType::QuantumShor,
            "quantumgrover" => RunType::QuantumGrover,
            _ => RunType::Other(s),
        }
    }
}

impl From<RunType> for String {
    fn from(t: RunType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a run: Pending → Running → Completed | Failed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Other(String),
}

impl RunStatus {
    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Pending => "Pending",
            RunStatus::Running => "Running",
            RunStatus::Completed => "Completed",
            RunStatus::Failed => "Failed",
            RunStatus::Other(s) => s,
        }
    }
}

impl From<String> for RunStatus {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pending" => RunStatus::Pending,
            "running" => RunStatus::Running,
            "completed" => RunStatus::Completed,
            "failed" => RunStatus::Failed,
            _ => RunStatus::Other(s),
        }
    }
}

impl From<RunStatus> for String {
    fn from(s: RunStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One executed benchmark or quantum job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    #[serde(alias = "run_id")]
    pub run_id: String,
    /// ISO-8601 creation time.
    pub timestamp: String,
    #[serde(alias = "run_type")]
    pub run_type: RunType,
    pub status: RunStatus,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default, alias = "security_param")]
    pub security_param: Option<String>,
    #[serde(default)]
    pub iterations: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Run {
    /// Minimal run, mostly useful for fixtures.
    pub fn new(
        run_id: impl Into<String>,
        timestamp: impl Into<String>,
        run_type: RunType,
        status: RunStatus,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            timestamp: timestamp.into(),
            run_type,
            status,
            algorithm: None,
            security_param: None,
            iterations: None,
            error: None,
            notes: None,
        }
    }

    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = Some(algorithm.into());
        self
    }

    pub fn with_security_param(mut self, param: impl Into<String>) -> Self {
        self.security_param = Some(param.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Classical detail
// ---------------------------------------------------------------------------

/// Timing and memory for one cryptographic operation. Any field may be missing
/// in stored data; see [`crate::classical`] for the backfill rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationMetric {
    #[serde(default)]
    pub min_ms: Option<f64>,
    #[serde(default)]
    pub max_ms: Option<f64>,
    #[serde(default)]
    pub avg_ms: Option<f64>,
    #[serde(default)]
    pub ops_per_sec: Option<f64>,
    #[serde(default)]
    pub mem_peak_kb: Option<f64>,
    #[serde(default)]
    pub mem_avg_kb: Option<f64>,
}

impl OperationMetric {
    pub fn from_avg(avg_ms: f64) -> Self {
        Self {
            avg_ms: Some(avg_ms),
            ..Default::default()
        }
    }
}

/// Byte sizes of the artifacts an algorithm produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeySizes {
    #[serde(default, alias = "publicKey")]
    pub public_key: Option<u64>,
    #[serde(default, alias = "secretKey")]
    pub secret_key: Option<u64>,
    #[serde(default)]
    pub signature: Option<u64>,
    #[serde(default)]
    pub ciphertext: Option<u64>,
    #[serde(default, alias = "sharedSecret")]
    pub shared_secret: Option<u64>,
    #[serde(default, alias = "symmetricKey")]
    pub symmetric_key: Option<u64>,
    #[serde(default)]
    pub iv: Option<u64>,
}

/// Measurements for one completed classical or post-quantum run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassicalDetail {
    #[serde(alias = "run_id")]
    pub run_id: String,
    #[serde(default, alias = "main_algorithm")]
    pub main_algorithm: String,
    #[serde(default)]
    pub variant: Option<String>,
    #[serde(default)]
    pub iterations: Option<u64>,
    #[serde(default)]
    pub curve: Option<String>,
    #[serde(default)]
    pub sizes: Option<KeySizes>,
    #[serde(default)]
    pub keygen: Option<OperationMetric>,
    #[serde(default)]
    pub sign: Option<OperationMetric>,
    #[serde(default)]
    pub verify: Option<OperationMetric>,
    #[serde(default)]
    pub encaps: Option<OperationMetric>,
    #[serde(default)]
    pub decaps: Option<OperationMetric>,
    #[serde(default)]
    pub encryption: Option<OperationMetric>,
    #[serde(default)]
    pub decryption: Option<OperationMetric>,
    #[serde(default, alias = "shared_secret")]
    pub shared_secret: Option<OperationMetric>,
}

impl ClassicalDetail {
    pub fn new(run_id: impl Into<String>, main_algorithm: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            main_algorithm: main_algorithm.into(),
            ..Default::default()
        }
    }

    /// Stored operation blocks in canonical order, absent ones skipped.
    pub fn operation_blocks(&self) -> impl Iterator<Item = (Operation, &OperationMetric)> {
        [
            (Operation::KeyGen, self.keygen.as_ref()),
            (Operation::Sign, self.sign.as_ref()),
            (Operation::Verify, self.verify.as_ref()),
            (Operation::Encapsulate, self.encaps.as_ref()),
            (Operation::Decapsulate, self.decaps.as_ref()),
            (Operation::Encryption, self.encryption.as_ref()),
            (Operation::Decryption, self.decryption.as_ref()),
            (Operation::SharedSecret, self.shared_secret.as_ref()),
        ]
        .into_iter()
        .filter_map(|(op, block)| block.map(|b| (op, b)))
    }
}

/// Cryptographic operation measured by a classical benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    #[serde(rename = "keygen")]
    KeyGen,
    Sign,
    Verify,
    Encapsulate,
    Decapsulate,
    Encryption,
    Decryption,
    SharedSecret,
}

impl Operation {
    pub const ALL: [Operation; 8] = [
        Operation::KeyGen,
        Operation::Sign,
        Operation::Verify,
        Operation::Encapsulate,
        Operation::Decapsulate,
        Operation::Encryption,
        Operation::Decryption,
        Operation::SharedSecret,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::KeyGen => "keygen",
            Operation::Sign => "sign",
            Operation::Verify => "verify",
            Operation::Encapsulate => "encapsulate",
            Operation::Decapsulate => "decapsulate",
            Operation::Encryption => "encryption",
            Operation::Decryption => "decryption",
            Operation::SharedSecret => "shared_secret",
        }
    }

    /// Parse an operation name, accepting the short stored forms `encaps`/`decaps`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keygen" => Some(Operation::KeyGen),
            "sign" => Some(Operation::Sign),
            "verify" => Some(Operation::Verify),
            "encaps" | "encapsulate" => Some(Operation::Encapsulate),
            "decaps" | "decapsulate" => Some(Operation::Decapsulate),
            "encryption" | "encrypt" => Some(Operation::Encryption),
            "decryption" | "decrypt" => Some(Operation::Decryption),
            "shared_secret" | "sharedsecret" => Some(Operation::SharedSecret),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Quantum result
// ---------------------------------------------------------------------------

/// Stored output of one quantum job.
///
/// Everything except `run_id` is kept as raw JSON; [`crate::extract`] reads
/// fields from the top level or from the nested `data` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantumResult {
    #[serde(alias = "runId")]
    pub run_id: String,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl QuantumResult {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            fields: serde_json::Map::new(),
        }
    }

    /// Set a top-level field.
    pub fn with_field(mut self, name: &str, value: serde_json::Value) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    /// Set a field under the nested `data` object, creating it if needed.
    pub fn with_data_field(mut self, name: &str, value: serde_json::Value) -> Self {
        let data = self
            .fields
            .entry("data")
            .or_insert_with(|| serde_json::Value::Object(serde_json::Map::new()));
        if !data.is_object() {
            *data = serde_json::Value::Object(serde_json::Map::new());
        }
        if let serde_json::Value::Object(map) = data {
            map.insert(name.to_string(), value);
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Processed records
// ---------------------------------------------------------------------------

/// One operation with every metric populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedOperation {
    pub operation: Operation,
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_ms: f64,
    pub ops_per_sec: f64,
    pub mem_peak_kb: f64,
    pub mem_avg_kb: f64,
}

/// Flat, render-ready classical benchmark record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedBenchmarkData {
    pub run_id: String,
    pub timestamp: String,
    pub algorithm: String,
    pub variant: String,
    pub security_param: String,
    pub iterations: u64,
    pub curve: Option<String>,
    pub sizes: Option<KeySizes>,
    pub operations: Vec<ProcessedOperation>,
    pub notes: Option<String>,
}

impl ProcessedBenchmarkData {
    pub fn operation(&self, op: Operation) -> Option<&ProcessedOperation> {
        self.operations.iter().find(|o| o.operation == op)
    }
}

/// Flat, render-ready quantum record with derived scores.
///
/// Metrics that could not be extracted are `None` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedQuantumData {
    pub run_id: String,
    pub timestamp: String,
    pub algorithm: String,
    pub run_type: RunType,
    pub run_status: RunStatus,

    // Execution
    pub execution_time_sec: Option<f64>,
    pub qpu_time_sec: Option<f64>,
    pub circuit_depth: Option<u64>,
    pub cx_gate_count: Option<u64>,
    pub total_gate_count: Option<u64>,
    pub backend_used: Option<String>,
    pub shots: Option<u64>,
    pub raw_counts: Option<BTreeMap<String, u64>>,
    pub plot_file_path: Option<String>,
    pub job_id: Option<String>,
    pub ran_on_hardware: Option<bool>,
    pub error_message: Option<String>,

    // Noise
    pub gate_error: Option<f64>,
    pub readout_error: Option<f64>,
    pub t1_time: Option<f64>,
    pub t2_time: Option<f64>,
    pub quantum_volume: Option<f64>,

    // Shor
    pub n_value: Option<u64>,
    pub a_value: Option<u64>,
    pub factors: Option<Vec<u64>>,
    pub status: Option<String>,
    pub period: Option<u64>,

    // Grover
    pub input_marked_states: Option<Vec<String>>,
    pub top_measured_state: Option<String>,
    pub top_measured_count: Option<u64>,
    pub found_correct_state: Option<bool>,
    pub num_qubits: Option<u64>,

    /// 1.0 when the run reached its algorithmic goal, else 0.0.
    pub success_rate: f64,
    /// Fraction of shots that produced a correct outcome.
    pub confidence: f64,
}

/// Common view over processed records used by the filters.
pub trait RunRecord {
    fn run_id(&self) -> &str;
    fn algorithm(&self) -> &str;
    fn timestamp(&self) -> &str;
}

impl RunRecord for ProcessedBenchmarkData {
    fn run_id(&self) -> &str {
        &self.run_id
    }
    fn algorithm(&self) -> &str {
        &self.algorithm
    }
    fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl RunRecord for ProcessedQuantumData {
    fn run_id(&self) -> &str {
        &self.run_id
    }
    fn algorithm(&self) -> &str {
        &self.algorithm
    }
    fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn run_type_parses_known_labels() {
        assert_eq!(RunType::from("QuantumShor".to_string()), RunType::QuantumShor);
        assert_eq!(RunType::from("quantum_grover".to_string()), RunType::QuantumGrover);
        assert_eq!(
            RunType::from("classical-benchmark".to_string()),
            RunType::ClassicalBenchmark
        );
    }

    #[test]
    fn run_type_keeps_unknown_labels() {
        let t = RunType::from("QuantumWalk".to_string());
        assert_eq!(t, RunType::Other("QuantumWalk".to_string()));
        assert!(t.is_quantum());
        assert!(!RunType::from("hash_bench".to_string()).is_quantum());
    }

    #[test]
    fn run_status_is_case_insensitive() {
        assert_eq!(RunStatus::from("completed".to_string()), RunStatus::Completed);
        assert_eq!(RunStatus::from("FAILED".to_string()), RunStatus::Failed);
        assert_eq!(
            RunStatus::from("queued".to_string()),
            RunStatus::Other("queued".to_string())
        );
    }

    #[test]
    fn run_deserializes_camel_and_snake_keys() {
        let camel: Run = serde_json::from_value(json!({
            "runId": "r1",
            "timestamp": "2026-01-01T00:00:00Z",
            "runType": "ClassicalBenchmark",
            "status": "Completed",
            "securityParam": "768"
        }))
        .unwrap();
        assert_eq!(camel.run_id, "r1");
        assert_eq!(camel.security_param.as_deref(), Some("768"));

        let snake: Run = serde_json::from_value(json!({
            "run_id": "r2",
            "timestamp": "2026-01-01T00:00:00Z",
            "run_type": "quantum_shor",
            "status": "completed"
        }))
        .unwrap();
        assert_eq!(snake.run_type, RunType::QuantumShor);
        assert_eq!(snake.status, RunStatus::Completed);
        assert!(snake.algorithm.is_none());
    }

    #[test]
    fn operation_blocks_follow_canonical_order() {
        let mut detail = ClassicalDetail::new("r1", "kyber");
        detail.decaps = Some(OperationMetric::from_avg(2.0));
        detail.keygen = Some(OperationMetric::from_avg(1.0));
        detail.encaps = Some(OperationMetric::from_avg(1.5));

        let ops: Vec<Operation> = detail.operation_blocks().map(|(op, _)| op).collect();
        assert_eq!(
            ops,
            vec![Operation::KeyGen, Operation::Encapsulate, Operation::Decapsulate]
        );
    }

    #[test]
    fn operation_parse_accepts_short_forms() {
        assert_eq!(Operation::parse("encaps"), Some(Operation::Encapsulate));
        assert_eq!(Operation::parse("Decapsulate"), Some(Operation::Decapsulate));
        assert_eq!(Operation::parse("hash"), None);
    }

    #[test]
    fn quantum_result_keeps_unknown_fields() {
        let r: QuantumResult = serde_json::from_value(json!({
            "run_id": "q1",
            "shots": 1024,
            "data": { "gate_error": 0.01 }
        }))
        .unwrap();
        assert_eq!(r.run_id, "q1");
        assert_eq!(r.fields.get("shots"), Some(&json!(1024)));
        assert!(r.fields.contains_key("data"));
    }

    #[test]
    fn with_data_field_nests_values() {
        let r = QuantumResult::new("q1")
            .with_data_field("gate_error", json!(0.02))
            .with_data_field("t1_time", json!(80.0));
        let data = r.fields.get("data").and_then(|d| d.as_object()).unwrap();
        assert_eq!(data.len(), 2);
    }
}
