//! Measurement counts and execution results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Observed frequency per classical bit pattern.
///
/// Keys list classical bits most-significant first: character `k` of an
/// `n`-bit key is classical bit `n-1-k`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

impl Counts {
    /// Create an empty counts map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` observations of `bitstring`.
    pub fn insert(&mut self, bitstring: impl Into<String>, count: u64) {
        *self.0.entry(bitstring.into()).or_insert(0) += count;
    }

    /// Observations of `bitstring` (zero when never seen).
    pub fn get(&self, bitstring: &str) -> u64 {
        self.0.get(bitstring).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no outcome was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate outcomes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Outcomes sorted by descending frequency, ties broken by key.
    pub fn sorted(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<_> = self.0.iter().map(|(k, &v)| (k.clone(), v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// The `k` most frequent outcomes.
    pub fn most_frequent(&self, k: usize) -> Vec<(String, u64)> {
        let mut entries = self.sorted();
        entries.truncate(k);
        entries
    }

    /// Relative frequency of each outcome.
    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total();
        if total == 0 {
            return BTreeMap::new();
        }
        self.0
            .iter()
            .map(|(k, &v)| (k.clone(), v as f64 / total as f64))
            .collect()
    }

    /// Frequencies of 0 and 1 on a single classical bit.
    ///
    /// Returns `None` when the bit is outside the recorded keys.
    pub fn marginal(&self, clbit: usize) -> Option<(u64, u64)> {
        let mut zeros = 0;
        let mut ones = 0;
        for (key, &count) in &self.0 {
            let width = key.len();
            if clbit >= width {
                return None;
            }
            match key.as_bytes()[width - 1 - clbit] {
                b'1' => ones += count,
                _ => zeros += count,
            }
        }
        Some((zeros, ones))
    }
}

impl FromIterator<(String, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (k, v) in iter {
            counts.insert(k, v);
        }
        counts
    }
}

/// Result of running a circuit for a number of shots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Measurement counts.
    pub counts: Counts,
    /// Number of shots executed.
    pub shots: u32,
    /// Wall-clock simulation time.
    pub execution_time_ms: u64,
}

impl ExecutionResult {
    /// Create a result without timing information.
    pub fn new(counts: Counts, shots: u32) -> Self {
        Self {
            counts,
            shots,
            execution_time_ms: 0,
        }
    }

    /// Attach the execution time.
    #[must_use]
    pub fn with_execution_time(mut self, ms: u64) -> Self {
        self.execution_time_ms = ms;
        self
    }
}
