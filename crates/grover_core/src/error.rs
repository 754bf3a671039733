//! Error types for Grover
//!
//! Gantree: L0_Foundation → Errors
//!
//! Every failure the engine can report. Validation and range errors are
//! returned to the caller as-is; the engine never retries or masks them.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for Grover
/// Gantree: GroverError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GroverError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Target bit string is empty
    #[error("Target state must not be empty")]
    EmptyTarget,

    /// Target contains characters other than '0' and '1'
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    /// Target length outside the configured qubit bounds
    #[error("Target state must be {min}-{max} qubits, got {qubits}")]
    QubitCountOutOfRange { qubits: usize, min: usize, max: usize },

    /// Shot count outside the configured bounds
    #[error("Shots {shots} out of range [{min}, {max}]")]
    ShotsOutOfRange { shots: u64, min: u64, max: u64 },

    /// Inconsistent configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Range Errors
    // ========================================================================
    /// State vector size outside what the simulator can hold
    #[error("Cannot allocate state for {qubits} qubits: supported range is 1-{max}")]
    StateSizeOutOfRange { qubits: usize, max: usize },

    /// Basis index outside the state vector
    #[error("Basis index {index} out of range for dimension {dimension}")]
    IndexOutOfRange { index: usize, dimension: usize },

    /// Gate on non-existent qubit
    #[error("Gate references qubit {qubit} but circuit has only {num_qubits} qubits")]
    GateQubitMismatch { qubit: usize, num_qubits: usize },

    /// Multi-qubit gate given no qubits
    #[error("Gate '{0}' needs at least one qubit")]
    EmptyGate(String),

    // ========================================================================
    // Numerical Errors
    // ========================================================================
    /// Probability distribution unusable for sampling
    #[error("Invalid probability distribution: {0}")]
    InvalidDistribution(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Result type alias for Grover operations
/// Gantree: GroverResult<T> // type alias
pub type GroverResult<T> = Result<T, GroverError>;

impl From<serde_json::Error> for GroverError {
    fn from(err: serde_json::Error) -> Self {
        GroverError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl GroverError {
    /// Check if error is a validation error (bad caller input)
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            GroverError::EmptyTarget
                | GroverError::InvalidBitstring(_)
                | GroverError::QubitCountOutOfRange { .. }
                | GroverError::ShotsOutOfRange { .. }
                | GroverError::InvalidConfig(_)
        )
    }

    /// Check if error is a range error (size or index limits)
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            GroverError::StateSizeOutOfRange { .. }
                | GroverError::IndexOutOfRange { .. }
                | GroverError::GateQubitMismatch { .. }
                | GroverError::EmptyGate(_)
        )
    }
}
