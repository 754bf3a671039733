//! Search execution results
//!
//! Gantree: L4_Engine → SearchResult
//!
//! Outcome of a shot-based Grover search: measurement counts plus the
//! metadata a caller needs to report the run.

use grover_core::Counts;
use serde::Serialize;
use std::fmt;

/// Result of a simulated search
/// Gantree: SearchResult // 검색 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Target bit string
    pub target_state: String,

    /// Number of qubits
    pub num_qubits: usize,

    /// Rounds applied before measurement
    pub optimal_iterations: usize,

    /// Number of shots drawn
    pub shots: u64,

    /// Percentage of shots that landed on the target
    pub success_rate: f64,

    /// Observed outcomes (basis string -> count)
    pub measurements: Counts,

    /// Depth of the equivalent gate circuit (diagnostic)
    pub circuit_depth: usize,

    /// Wall-clock time of the run, milliseconds (2 decimals)
    pub execution_time_ms: f64,

    /// Start of the run, RFC 3339 UTC
    pub timestamp: String,

    /// Sampler seed, for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SearchResult {
    /// Total count (equals shots)
    pub fn total_counts(&self) -> u64 {
        self.measurements.values().sum()
    }

    /// Shots that landed on the target
    pub fn target_count(&self) -> u64 {
        self.measurements
            .get(&self.target_state)
            .copied()
            .unwrap_or(0)
    }

    /// Observed frequency of a basis string
    pub fn probability(&self, bitstring: &str) -> f64 {
        let count = self.measurements.get(bitstring).copied().unwrap_or(0);
        count as f64 / self.shots as f64
    }

    /// Most frequent outcome (lowest index wins ties)
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        self.measurements
            .iter()
            .fold(None, |best: Option<(&String, u64)>, (bs, &count)| match best {
                Some((_, c)) if c >= count => best,
                _ => Some((bs, count)),
            })
    }

    /// Whether the most frequent outcome is the target
    pub fn found_target(&self) -> bool {
        self.most_frequent()
            .map(|(bs, _)| *bs == self.target_state)
            .unwrap_or(false)
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SearchResult(target={}, k={}, shots={}, success={:.2}%)",
            self.target_state, self.optimal_iterations, self.shots, self.success_rate
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
