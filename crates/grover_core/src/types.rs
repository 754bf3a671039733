//! Core types for Grover
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Validated search target plus the map types shared by the engine.

use crate::constants::qubits;
use crate::error::{GroverError, GroverResult};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit identifier (0-indexed, qubit 0 = least significant bit of a basis index)
pub type QubitId = usize;

/// Measurement counts: basis string -> count
pub type Counts = BTreeMap<String, u64>;

/// Probability per basis string
pub type ProbabilityMap = BTreeMap<String, f64>;

/// Fixed-width binary label of a basis index, most significant bit first
///
/// ```rust
/// use grover_core::basis_label;
///
/// assert_eq!(basis_label(5, 3), "101");
/// assert_eq!(basis_label(1, 4), "0001");
/// ```
#[inline]
pub fn basis_label(index: usize, width: usize) -> String {
    format!("{:0width$b}", index, width = width)
}

// ============================================================================
// TargetSpec
// ============================================================================

/// Search target: a bit string whose length sets the qubit count
/// Gantree: TargetSpec // 검증된 타깃
///
/// Immutable once built. The marked basis index is the string read as an
/// unsigned base-2 integer, so `"101"` marks index 5.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TargetSpec {
    bits: String,
    num_qubits: usize,
    index: usize,
}

impl TargetSpec {
    /// Validate `bits` against an inclusive qubit range
    ///
    /// Format is checked before length, so `"12"` reports a bad character
    /// even when the length is also out of range.
    pub fn new(bits: &str, min_qubits: usize, max_qubits: usize) -> GroverResult<Self> {
        if bits.is_empty() {
            return Err(GroverError::EmptyTarget);
        }
        if !bits.chars().all(|c| c == '0' || c == '1') {
            return Err(GroverError::InvalidBitstring(bits.to_string()));
        }

        let num_qubits = bits.len();
        if num_qubits < min_qubits || num_qubits > max_qubits {
            return Err(GroverError::QubitCountOutOfRange {
                qubits: num_qubits,
                min: min_qubits,
                max: max_qubits,
            });
        }
        // Upper bound keeps the shift below from overflowing for any config
        if num_qubits > qubits::HARD_MAX_QUBITS {
            return Err(GroverError::StateSizeOutOfRange {
                qubits: num_qubits,
                max: qubits::HARD_MAX_QUBITS,
            });
        }

        let index = bits
            .bytes()
            .fold(0usize, |acc, b| (acc << 1) | usize::from(b == b'1'));

        Ok(Self {
            bits: bits.to_string(),
            num_qubits,
            index,
        })
    }

    /// Validate against the default 1-8 qubit range
    pub fn parse(bits: &str) -> GroverResult<Self> {
        Self::new(bits, qubits::MIN_QUBITS, qubits::MAX_QUBITS)
    }

    /// Target bit string
    pub fn bits(&self) -> &str {
        &self.bits
    }

    /// Number of qubits (string length)
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Marked basis index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Size of the search space (2^n)
    pub fn search_space(&self) -> usize {
        qubits::search_space(self.num_qubits)
    }

    /// Value of the target bit carried by `qubit` (qubit 0 = last character)
    pub fn bit(&self, qubit: QubitId) -> bool {
        (self.index >> qubit) & 1 == 1
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|{}⟩", self.bits)
    }
}
