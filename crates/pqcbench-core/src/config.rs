//! Tunable constants for the quantum success heuristics.
//!
//! The peak and bit-flip tolerances are empirical. They are exposed here so
//! they can be adjusted from a JSON file instead of being baked in.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shor hardware peak detection.
///
/// A measurement counts as correct when it falls within
/// `max(min_peak_tolerance, floor(Q / (r * peak_tolerance_divisor)))` of a
/// predicted peak `j * Q / r`.
///
/// The period search behind `r` tries at most `max_period_search` exponents;
/// past that the period falls back to `N`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShorConfig {
    pub min_peak_tolerance: u64,
    pub peak_tolerance_divisor: u64,
    pub max_period_search: u64,
    /// How many of the most frequent outcomes to try when recovering factors.
    /// `None` tries every outcome.
    pub factor_search_outcomes: Option<usize>,
}

impl Default for ShorConfig {
    fn default() -> Self {
        Self {
            min_peak_tolerance: 3,
            peak_tolerance_divisor: 10,
            max_period_search: 1 << 16,
            factor_search_outcomes: None,
        }
    }
}

/// Grover bit-flip tolerance:
/// `min(max(min_bit_flips, floor(len / bits_per_flip)), max_bit_flips)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroverConfig {
    pub min_bit_flips: usize,
    pub bits_per_flip: usize,
    pub max_bit_flips: usize,
}

impl Default for GroverConfig {
    fn default() -> Self {
        Self {
            min_bit_flips: 1,
            bits_per_flip: 5,
            max_bit_flips: 3,
        }
    }
}

/// All heuristic settings used by the quantum evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicConfig {
    pub shor: ShorConfig,
    pub grover: GroverConfig,
    /// Case-insensitive substrings that mark a backend as a simulator.
    pub simulator_markers: Vec<String>,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            shor: ShorConfig::default(),
            grover: GroverConfig::default(),
            simulator_markers: vec!["sim".to_string(), "simulator".to_string()],
        }
    }
}

impl HeuristicConfig {
    /// True when the backend name contains any simulator marker.
    pub fn is_simulator_backend(&self, backend: &str) -> bool {
        let backend = backend.to_ascii_lowercase();
        self.simulator_markers
            .iter()
            .any(|m| !m.is_empty() && backend.contains(&m.to_ascii_lowercase()))
    }

    /// Reject settings that would divide by zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shor.peak_tolerance_divisor == 0 {
            return Err(ConfigError::Invalid(
                "shor.peak_tolerance_divisor must be > 0".to_string(),
            ));
        }
        if self.grover.bits_per_flip == 0 {
            return Err(ConfigError::Invalid(
                "grover.bits_per_flip must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load and validate a config from a JSON file. Missing keys take defaults.
pub fn load_config_from_path(path: &Path) -> Result<HeuristicConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: HeuristicConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}
