//! Closed-form Grover analysis
//!
//! Gantree: L3_Analysis → AnalysisCalculator
//!
//! Theoretical success probability and classical-vs-quantum comparison,
//! computed from the qubit count alone. No state vector is involved.

use grover_core::constants::qubits;
use grover_core::TargetSpec;
use serde::Serialize;
use std::f64::consts::FRAC_PI_4;
use std::fmt;

// ============================================================================
// Formulas
// ============================================================================

/// Optimal number of Grover rounds for a single marked state
/// Gantree: optimal_iterations(n) -> usize // 최적 반복 수
///
/// `max(1, floor(π/4 · sqrt(2^n)))`. Every caller in the workspace goes
/// through this function.
///
/// ```rust
/// use grover_sim::optimal_iterations;
///
/// assert_eq!(optimal_iterations(1), 1);
/// assert_eq!(optimal_iterations(3), 2);
/// assert_eq!(optimal_iterations(8), 12);
/// ```
pub fn optimal_iterations(num_qubits: usize) -> usize {
    let n = search_space_f64(num_qubits);
    ((FRAC_PI_4 * n.sqrt()).floor() as usize).max(1)
}

/// Probability of measuring the marked state after `iterations` rounds
///
/// `sin²((2k+1)·θ)` with `θ = asin(1/sqrt(2^n))`.
pub fn success_probability(num_qubits: usize, iterations: usize) -> f64 {
    let n = search_space_f64(num_qubits);
    let theta = (1.0 / n.sqrt()).asin();
    let angle = (2.0 * iterations as f64 + 1.0) * theta;
    angle.sin().powi(2)
}

/// `2^n` as a float; exact for any n, no integer shift involved
fn search_space_f64(num_qubits: usize) -> f64 {
    2f64.powi(num_qubits.min(i32::MAX as usize) as i32)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// AnalysisResult
// ============================================================================

/// Derived scalars for an n-qubit search
/// Gantree: AnalysisResult // 이론 분석
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Number of qubits
    pub num_qubits: usize,

    /// Search space size (2^n)
    pub search_space_size: usize,

    /// Optimal round count
    pub optimal_iterations: usize,

    /// Theoretical success, percent (capped at 100)
    pub theoretical_success_rate: f64,

    /// Classical average number of tries (N/2)
    pub classical_average_tries: f64,

    /// Quantum oracle calls (one per round)
    pub quantum_operations: usize,

    /// Classical average over quantum operations
    pub speedup_factor: f64,
}

impl AnalysisResult {
    /// Compute the exact (unrounded) analysis for `num_qubits`
    /// Gantree: compute(n) -> Self // 계산
    pub fn compute(num_qubits: usize) -> Self {
        let search_space_size = qubits::search_space(num_qubits);
        let optimal = optimal_iterations(num_qubits);
        let success = (success_probability(num_qubits, optimal) * 100.0).min(100.0);
        let classical_average = search_space_f64(num_qubits) / 2.0;

        Self {
            num_qubits,
            search_space_size,
            optimal_iterations: optimal,
            theoretical_success_rate: success,
            classical_average_tries: classical_average,
            quantum_operations: optimal,
            speedup_factor: classical_average / optimal as f64,
        }
    }

    /// Display copy: success to 1 decimal, speedup to 2 decimals
    pub fn rounded(&self) -> Self {
        Self {
            theoretical_success_rate: round_to(self.theoretical_success_rate, 1),
            speedup_factor: round_to(self.speedup_factor, 2),
            ..self.clone()
        }
    }
}

impl fmt::Display for AnalysisResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}q: N={}, k={}, success={:.1}%, speedup={:.2}x",
            self.num_qubits,
            self.search_space_size,
            self.optimal_iterations,
            self.theoretical_success_rate,
            self.speedup_factor
        )
    }
}

// ============================================================================
// AnalysisReport
// ============================================================================

/// Classical vs quantum operation counts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceComparison {
    /// Classical worst case (N)
    pub classical_worst_case: usize,

    /// Classical average case (N/2)
    pub classical_average_case: f64,

    /// Grover rounds
    pub quantum_grover: usize,

    /// Human-readable advantage
    pub advantage: String,
}

/// Analysis of a validated target, in display form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Target bit string
    pub target_state: String,

    /// Rounded analysis scalars
    pub analysis: AnalysisResult,

    /// Operation count comparison
    pub performance_comparison: PerformanceComparison,
}

impl AnalysisReport {
    /// Build the report for `target`
    pub fn new(target: &TargetSpec) -> Self {
        let exact = AnalysisResult::compute(target.num_qubits());

        let performance_comparison = PerformanceComparison {
            classical_worst_case: exact.search_space_size,
            classical_average_case: exact.classical_average_tries,
            quantum_grover: exact.quantum_operations,
            advantage: format!(
                "{:.1}x faster on average (operations needed)",
                exact.speedup_factor
            ),
        };

        Self {
            target_state: target.bits().to_string(),
            analysis: exact.rounded(),
            performance_comparison,
        }
    }
}
