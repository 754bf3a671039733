//! Real-amplitude state vector
//!
//! Gantree: L2_Sim → StateVector
//!
//! Grover's operators never introduce a phase other than ±1, so the state is
//! held as `2^n` real amplitudes. Index `i` is the basis state whose bit
//! string is `i` written in base 2, most significant bit first.

use grover_core::constants::{numeric, qubits};
use grover_core::{basis_label, GroverError, GroverResult, ProbabilityMap};
use std::fmt;

/// State vector of `2^n` real amplitudes
/// Gantree: StateVector // 상태 벡터
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<f64>,
}

impl StateVector {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Allocate `|0…0⟩` over `num_qubits` qubits
    /// Gantree: new(n) -> Result<Self> // 할당
    pub fn new(num_qubits: usize) -> GroverResult<Self> {
        if num_qubits == 0 || num_qubits > qubits::HARD_MAX_QUBITS {
            return Err(GroverError::StateSizeOutOfRange {
                qubits: num_qubits,
                max: qubits::HARD_MAX_QUBITS,
            });
        }

        let mut amplitudes = vec![0.0; qubits::search_space(num_qubits)];
        amplitudes[0] = 1.0;

        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Allocate already in uniform superposition
    pub fn uniform(num_qubits: usize) -> GroverResult<Self> {
        let mut state = Self::new(num_qubits)?;
        state.uniform_init();
        Ok(state)
    }

    /// Set every amplitude to `1/sqrt(2^n)`
    /// Gantree: uniform_init(&mut self) // 균등 중첩
    pub fn uniform_init(&mut self) {
        let amp = 1.0 / (self.dimension() as f64).sqrt();
        self.amplitudes.fill(amp);
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of basis states (2^n)
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitudes in index order
    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    pub(crate) fn amplitudes_mut(&mut self) -> &mut [f64] {
        &mut self.amplitudes
    }

    /// Amplitude squared per index
    /// Gantree: probabilities(&self) -> Vec<f64> // 확률 분포
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a * a).collect()
    }

    /// Probability of a single basis index
    pub fn probability_of(&self, index: usize) -> GroverResult<f64> {
        self.amplitudes
            .get(index)
            .map(|a| a * a)
            .ok_or(GroverError::IndexOutOfRange {
                index,
                dimension: self.dimension(),
            })
    }

    /// Probabilities keyed by fixed-width basis string
    pub fn probability_map(&self) -> ProbabilityMap {
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(i, a)| (basis_label(i, self.num_qubits), a * a))
            .collect()
    }

    /// Sum of all probabilities
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a * a).sum()
    }

    /// Check normalization within `eps`
    pub fn is_normalized(&self, eps: f64) -> bool {
        (self.total_probability() - 1.0).abs() <= eps
    }

    /// Check normalization at the default tolerance
    pub fn is_valid(&self) -> bool {
        self.is_normalized(numeric::NORM_TOLERANCE)
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StateVector({}q, dim={}, norm={:.6})",
            self.num_qubits,
            self.dimension(),
            self.total_probability()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_is_ground_state() {
        let state = StateVector::new(3).unwrap();
        assert_eq!(state.dimension(), 8);
        assert_eq!(state.probability_of(0).unwrap(), 1.0);
        assert!(state.is_valid());
    }

    #[test]
    fn test_size_bounds() {
        assert!(matches!(
            StateVector::new(0),
            Err(GroverError::StateSizeOutOfRange { qubits: 0, .. })
        ));
        assert!(StateVector::new(qubits::HARD_MAX_QUBITS + 1).is_err());
    }

    #[test]
    fn test_uniform_init() {
        let state = StateVector::uniform(4).unwrap();
        for p in state.probabilities() {
            assert_relative_eq!(p, 1.0 / 16.0, epsilon = 1e-12);
        }
        assert!(state.is_normalized(1e-12));
    }

    #[test]
    fn test_probability_of_out_of_range() {
        let state = StateVector::uniform(2).unwrap();
        assert_eq!(
            state.probability_of(4),
            Err(GroverError::IndexOutOfRange {
                index: 4,
                dimension: 4
            })
        );
    }

    #[test]
    fn test_probability_map_keys() {
        let state = StateVector::uniform(2).unwrap();
        let keys: Vec<_> = state.probability_map().into_keys().collect();
        assert_eq!(keys, vec!["00", "01", "10", "11"]);
    }
}
