//! Quantum gate definitions for Grover circuits
//!
//! Gantree: L1_Circuit → Gate
//!
//! The gate set needed to express the oracle and diffusion operators as a
//! network: Hadamard, Pauli X/Z, and (multi-)controlled Z.

use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantum gate enumeration
/// Gantree: Gate // 게이트 enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    // ========================================================================
    // Single-Qubit Gates
    // ========================================================================
    /// Hadamard gate
    H(QubitId),

    /// Pauli-X gate (NOT)
    X(QubitId),

    /// Pauli-Z gate
    Z(QubitId),

    // ========================================================================
    // Controlled Phase Gates
    // ========================================================================
    /// Controlled-Z
    Cz(QubitId, QubitId),

    /// Multi-controlled Z over all listed qubits (symmetric, so no distinguished target)
    Mcz(Vec<QubitId>),

    // ========================================================================
    // Measurement and Control
    // ========================================================================
    /// Single qubit measurement
    Measure(QubitId),

    /// Measure all qubits (convenience)
    MeasureAll,

    /// Barrier (for visualization)
    Barrier(Vec<QubitId>),
}

impl Gate {
    // ========================================================================
    // Gate Properties
    // ========================================================================

    /// Get qubits involved in this gate
    pub fn qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::H(q) | Gate::X(q) | Gate::Z(q) | Gate::Measure(q) => vec![*q],
            Gate::Cz(a, b) => vec![*a, *b],
            Gate::Mcz(qs) | Gate::Barrier(qs) => qs.clone(),
            Gate::MeasureAll => vec![], // Applied to all qubits
        }
    }

    /// Check if gate is single-qubit
    pub fn is_single_qubit(&self) -> bool {
        matches!(self, Gate::H(_) | Gate::X(_) | Gate::Z(_))
            || matches!(self, Gate::Mcz(qs) if qs.len() == 1)
    }

    /// Check if gate is two-qubit
    pub fn is_two_qubit(&self) -> bool {
        matches!(self, Gate::Cz(_, _)) || matches!(self, Gate::Mcz(qs) if qs.len() == 2)
    }

    /// Check if gate is measurement
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure(_) | Gate::MeasureAll)
    }

    /// Check if gate is a barrier
    pub fn is_barrier(&self) -> bool {
        matches!(self, Gate::Barrier(_))
    }

    /// Check if gate acts on the state (not a barrier or measurement)
    pub fn is_unitary(&self) -> bool {
        !self.is_barrier() && !self.is_measurement()
    }

    /// Get gate name, using the conventional name for each control count
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H(_) => "h",
            Gate::X(_) => "x",
            Gate::Z(_) => "z",
            Gate::Cz(_, _) => "cz",
            Gate::Mcz(qs) => match qs.len() {
                1 => "z",
                2 => "cz",
                3 => "ccz",
                _ => "mcz",
            },
            Gate::Measure(_) | Gate::MeasureAll => "measure",
            Gate::Barrier(_) => "barrier",
        }
    }

    /// Convert to an OpenQASM 3.0 statement
    pub fn to_qasm(&self) -> String {
        match self {
            Gate::H(q) => format!("h q[{}];", q),
            Gate::X(q) => format!("x q[{}];", q),
            Gate::Z(q) => format!("z q[{}];", q),
            Gate::Cz(a, b) => format!("cz q[{}], q[{}];", a, b),
            Gate::Mcz(qs) => match qs.as_slice() {
                [q] => format!("z q[{}];", q),
                [a, b] => format!("cz q[{}], q[{}];", a, b),
                _ => format!("ctrl({}) @ z {};", qs.len().saturating_sub(1), qubit_list(qs)),
            },
            Gate::Measure(q) => format!("c[{}] = measure q[{}];", q, q),
            Gate::MeasureAll => "c = measure q;".to_string(),
            Gate::Barrier(qs) => {
                if qs.is_empty() {
                    "barrier q;".to_string()
                } else {
                    format!("barrier {};", qubit_list(qs))
                }
            }
        }
    }
}

fn qubit_list(qs: &[QubitId]) -> String {
    qs.iter()
        .map(|q| format!("q[{}]", q))
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_qasm())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_qubits() {
        assert_eq!(Gate::H(0).qubits(), vec![0]);
        assert_eq!(Gate::Cz(0, 1).qubits(), vec![0, 1]);
        assert_eq!(Gate::Mcz(vec![0, 1, 2]).qubits(), vec![0, 1, 2]);
        assert!(Gate::MeasureAll.qubits().is_empty());
    }

    #[test]
    fn test_gate_names() {
        assert_eq!(Gate::Mcz(vec![0]).name(), "z");
        assert_eq!(Gate::Mcz(vec![0, 1]).name(), "cz");
        assert_eq!(Gate::Mcz(vec![0, 1, 2]).name(), "ccz");
        assert_eq!(Gate::Mcz(vec![0, 1, 2, 3]).name(), "mcz");
    }

    #[test]
    fn test_gate_classification() {
        assert!(Gate::H(0).is_single_qubit());
        assert!(Gate::Cz(0, 1).is_two_qubit());
        assert!(Gate::Mcz(vec![0, 1]).is_two_qubit());
        assert!(!Gate::Barrier(vec![0]).is_unitary());
        assert!(!Gate::MeasureAll.is_unitary());
        assert!(Gate::Mcz(vec![0, 1, 2]).is_unitary());
    }

    #[test]
    fn test_gate_to_qasm() {
        assert_eq!(Gate::H(0).to_qasm(), "h q[0];");
        assert_eq!(Gate::Cz(0, 1).to_qasm(), "cz q[0], q[1];");
        assert_eq!(
            Gate::Mcz(vec![0, 1, 2]).to_qasm(),
            "ctrl(2) @ z q[0], q[1], q[2];"
        );
        assert_eq!(Gate::MeasureAll.to_qasm(), "c = measure q;");
    }
}
