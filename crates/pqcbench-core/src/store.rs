//! Run store readers.
//!
//! The normalizers never touch storage directly; they are fed by a
//! [`RunStore`], which hands back the three raw collections.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::{ClassicalDetail, QuantumResult, Run};

/// Source of raw run data.
pub trait RunStore {
    /// Every stored run, in storage order.
    fn get_all_runs(&self) -> Result<Vec<Run>, StoreError>;

    /// Every stored classical benchmark detail.
    fn get_all_classical_details(&self) -> Result<Vec<ClassicalDetail>, StoreError>;

    /// Every stored quantum result.
    fn get_all_quantum_results(&self) -> Result<Vec<QuantumResult>, StoreError>;

    /// All three collections read together. The default calls the getters
    /// in order; stores that can read everything at once should override it.
    fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        Ok(StoreSnapshot {
            runs: self.get_all_runs()?,
            classical_details: self.get_all_classical_details()?,
            quantum_results: self.get_all_quantum_results()?,
        })
    }
}

/// The three collections as one serializable document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    #[serde(default)]
    pub runs: Vec<Run>,
    #[serde(default, alias = "classical_details")]
    pub classical_details: Vec<ClassicalDetail>,
    #[serde(default, alias = "quantum_results")]
    pub quantum_results: Vec<QuantumResult>,
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Store backed by owned vectors.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: StoreSnapshot,
}

impl MemoryStore {
    pub fn new(
        runs: Vec<Run>,
        classical_details: Vec<ClassicalDetail>,
        quantum_results: Vec<QuantumResult>,
    ) -> Self {
        Self {
            snapshot: StoreSnapshot {
                runs,
                classical_details,
                quantum_results,
            },
        }
    }

    pub fn push_run(&mut self, run: Run) {
        self.snapshot.runs.push(run);
    }

    pub fn push_classical_detail(&mut self, detail: ClassicalDetail) {
        self.snapshot.classical_details.push(detail);
    }

    pub fn push_quantum_result(&mut self, result: QuantumResult) {
        self.snapshot.quantum_results.push(result);
    }
}

impl From<StoreSnapshot> for MemoryStore {
    fn from(snapshot: StoreSnapshot) -> Self {
        Self { snapshot }
    }
}

impl RunStore for MemoryStore {
    fn get_all_runs(&self) -> Result<Vec<Run>, StoreError> {
        Ok(self.snapshot.runs.clone())
    }

    fn get_all_classical_details(&self) -> Result<Vec<ClassicalDetail>, StoreError> {
        Ok(self.snapshot.classical_details.clone())
    }

    fn get_all_quantum_results(&self) -> Result<Vec<QuantumResult>, StoreError> {
        Ok(self.snapshot.quantum_results.clone())
    }

    fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        Ok(self.snapshot.clone())
    }
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// Store backed by a single JSON document on disk.
///
/// Each getter re-reads the file. [`RunStore::snapshot`] parses it once, so
/// all three collections come from the same version of the document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the whole document.
    pub fn load(&self) -> Result<StoreSnapshot, StoreError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let snapshot: StoreSnapshot =
            serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        log::debug!(
            "loaded {} runs, {} classical details, {} quantum results from {}",
            snapshot.runs.len(),
            snapshot.classical_details.len(),
            snapshot.quantum_results.len(),
            self.path.display()
        );
        Ok(snapshot)
    }

    /// Write a snapshot as pretty JSON, replacing the file.
    pub fn save(&self, snapshot: &StoreSnapshot) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(snapshot).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl RunStore for JsonFileStore {
    fn get_all_runs(&self) -> Result<Vec<Run>, StoreError> {
        Ok(self.load()?.runs)
    }

    fn get_all_classical_details(&self) -> Result<Vec<ClassicalDetail>, StoreError> {
        Ok(self.load()?.classical_details)
    }

    fn get_all_quantum_results(&self) -> Result<Vec<QuantumResult>, StoreError> {
        Ok(self.load()?.quantum_results)
    }

    fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        self.load()
    }
}
