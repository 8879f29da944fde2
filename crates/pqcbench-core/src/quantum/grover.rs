//! Grover's algorithm scoring with bit-flip tolerant marked-state matching.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::GroverConfig;

/// Mismatched bits between two bitstrings aligned on their right end.
///
/// The overlapping suffix is compared bit by bit; every bit of length
/// difference counts as one more mismatch.
pub fn hamming_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let overlap = a.len().min(b.len());
    let mismatched = a[a.len() - overlap..]
        .iter()
        .zip(&b[b.len() - overlap..])
        .filter(|(x, y)| x != y)
        .count();
    mismatched + a.len().abs_diff(b.len())
}

/// Bit flips tolerated for a marked state of `len` bits.
pub fn bit_flip_tolerance(len: usize, config: &GroverConfig) -> usize {
    (len / config.bits_per_flip.max(1))
        .max(config.min_bit_flips)
        .min(config.max_bit_flips)
}

/// Measured keys accepted as hits for the given marked states.
///
/// An exact key wins for its marked state. Without one, every key within the
/// bit-flip tolerance is accepted. A key is never counted twice.
pub fn accepted_states<'a>(
    marked: &[String],
    counts: &'a BTreeMap<String, u64>,
    config: &GroverConfig,
) -> BTreeSet<&'a str> {
    marked
        .iter()
        .flat_map(|state| -> Vec<&'a str> {
            if let Some((key, _)) = counts.get_key_value(state) {
                return vec![key.as_str()];
            }
            let tolerance = bit_flip_tolerance(state.len(), config);
            counts
                .keys()
                .filter(|k| hamming_distance(k, state) <= tolerance)
                .map(String::as_str)
                .collect()
        })
        .collect()
}

/// Shots that landed on (or near) a marked state, over all shots.
/// `None` when there are no marked states or no counted shots.
pub fn marked_state_confidence(
    marked: &[String],
    counts: &BTreeMap<String, u64>,
    config: &GroverConfig,
) -> Option<f64> {
    let total: u64 = counts.values().sum();
    if marked.is_empty() || total == 0 {
        return None;
    }
    let hits: u64 = accepted_states(marked, counts, config)
        .into_iter()
        .filter_map(|k| counts.get(k))
        .sum();
    Some(hits as f64 / total as f64)
}

/// Confidence with the fallback chain: marked states, then the stored top
/// count over shots, then the largest raw count over shots, then 0.
pub fn confidence(
    marked: &[String],
    counts: &BTreeMap<String, u64>,
    top_measured_count: Option<u64>,
    shots: Option<u64>,
    config: &GroverConfig,
) -> f64 {
    if let Some(c) = marked_state_confidence(marked, counts, config) {
        return c;
    }
    let Some(shots) = shots.filter(|s| *s > 0) else {
        return 0.0;
    };
    top_measured_count
        .or_else(|| counts.values().copied().max())
        .map(|top| top as f64 / shots as f64)
        .unwrap_or(0.0)
}

/// Most frequent measurement; ties go to the lexically smallest key.
pub fn top_state(counts: &BTreeMap<String, u64>) -> Option<(&str, u64)> {
    counts
        .iter()
        .max_by(|x, y| x.1.cmp(y.1).then_with(|| y.0.cmp(x.0)))
        .map(|(k, c)| (k.as_str(), *c))
}
