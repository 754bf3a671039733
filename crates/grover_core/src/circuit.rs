//! Quantum circuit structure for Grover
//!
//! Gantree: L1_Circuit → Circuit
//!
//! Gate-level representation of a Grover search, used for diagnostics
//! (depth, gate summary, diagram) and for submission to remote hardware.

use crate::error::{GroverError, GroverResult};
use crate::gate::Gate;
use crate::types::QubitId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Quantum circuit
/// Gantree: Circuit // 회로 구조체
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Circuit {
    /// Number of qubits (and classical bits)
    num_qubits: usize,

    /// Gate sequence
    gates: Vec<Gate>,

    /// Optional circuit name
    name: Option<String>,
}

impl Circuit {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create a new empty circuit
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: None,
        }
    }

    /// Create a circuit with a name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            name: Some(name.into()),
        }
    }

    /// Create from a vector of gates
    pub fn from_gates(num_qubits: usize, gates: Vec<Gate>) -> GroverResult<Self> {
        let mut circuit = Self::new(num_qubits);
        circuit.add_gates(gates)?;
        Ok(circuit)
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Add a gate to the circuit
    pub fn add_gate(&mut self, gate: Gate) -> GroverResult<()> {
        if let Gate::Mcz(qs) = &gate {
            if qs.is_empty() {
                return Err(GroverError::EmptyGate(gate.name().to_string()));
            }
        }
        for &qubit in &gate.qubits() {
            if qubit >= self.num_qubits {
                return Err(GroverError::GateQubitMismatch {
                    qubit,
                    num_qubits: self.num_qubits,
                });
            }
        }
        self.gates.push(gate);
        Ok(())
    }

    /// Add multiple gates
    pub fn add_gates(&mut self, gates: impl IntoIterator<Item = Gate>) -> GroverResult<()> {
        for gate in gates {
            self.add_gate(gate)?;
        }
        Ok(())
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of classical bits (one per qubit)
    pub fn num_clbits(&self) -> usize {
        self.num_qubits
    }

    /// Get gates
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Get circuit name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Check if circuit is empty
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    // ========================================================================
    // Circuit Analysis
    // ========================================================================

    /// Qubits a gate occupies; whole-register gates cover every qubit
    fn footprint(&self, gate: &Gate) -> Vec<QubitId> {
        let qubits = gate.qubits();
        if qubits.is_empty() {
            (0..self.num_qubits).collect()
        } else {
            qubits
        }
    }

    /// Calculate circuit depth (longest path), ignoring barriers
    /// Gantree: depth(&self) -> usize // 깊이 계산
    pub fn depth(&self) -> usize {
        let mut qubit_depths = vec![0usize; self.num_qubits];

        for gate in self.gates.iter().filter(|g| !g.is_barrier()) {
            let qubits = self.footprint(gate);
            let max_depth = qubits
                .iter()
                .filter_map(|&q| qubit_depths.get(q))
                .max()
                .copied()
                .unwrap_or(0);

            for &q in &qubits {
                qubit_depths[q] = max_depth + 1;
            }
        }

        qubit_depths.into_iter().max().unwrap_or(0)
    }

    /// Total operation count, ignoring barriers; `MeasureAll` counts once per qubit
    pub fn gate_count(&self) -> usize {
        self.gates
            .iter()
            .filter(|g| !g.is_barrier())
            .map(|g| match g {
                Gate::MeasureAll => self.num_qubits,
                _ => 1,
            })
            .sum()
    }

    /// Count two-qubit gates
    pub fn count_2q(&self) -> usize {
        self.gates.iter().filter(|g| g.is_two_qubit()).count()
    }

    /// Operation counts keyed by gate name
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut ops = BTreeMap::new();
        for gate in &self.gates {
            let n = match gate {
                Gate::MeasureAll => self.num_qubits,
                _ => 1,
            };
            *ops.entry(gate.name().to_string()).or_insert(0) += n;
        }
        ops
    }

    // ========================================================================
    // Output
    // ========================================================================

    /// Convert to OpenQASM 3.0 source
    pub fn to_qasm(&self) -> String {
        let mut lines = vec![
            "OPENQASM 3.0;".to_string(),
            "include \"stdgates.inc\";".to_string(),
            String::new(),
            format!("qubit[{}] q;", self.num_qubits),
            format!("bit[{}] c;", self.num_qubits),
            String::new(),
        ];

        lines.extend(self.gates.iter().map(Gate::to_qasm));
        lines.join("\n")
    }

    /// ASCII diagram, one row per qubit (qubit 0 on top)
    ///
    /// Gates that span several qubits are drawn in one column; rows crossed
    /// by such a gate without taking part show `┼`.
    pub fn draw(&self) -> String {
        let n = self.num_qubits;
        if n == 0 {
            return String::new();
        }

        let mut frontier = vec![0usize; n];
        let mut columns: Vec<Vec<&'static str>> = Vec::new();

        for gate in &self.gates {
            let qubits = self.footprint(gate);
            let lo = qubits.iter().copied().min().unwrap_or(0);
            let hi = qubits.iter().copied().max().unwrap_or(0);

            let layer = frontier[lo..=hi].iter().copied().max().unwrap_or(0);
            if layer == columns.len() {
                columns.push(vec!["───"; n]);
            }

            for (q, slot) in frontier.iter_mut().enumerate().take(hi + 1).skip(lo) {
                *slot = layer + 1;
                columns[layer][q] = "─┼─";
            }
            for &q in &qubits {
                columns[layer][q] = cell(gate);
            }
        }

        let label_width = format!("q{}", n - 1).len();
        (0..n)
            .map(|q| {
                let mut row = format!("{:>width$}: ", format!("q{}", q), width = label_width);
                for column in &columns {
                    row.push_str(column[q]);
                }
                row
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn cell(gate: &Gate) -> &'static str {
    match gate {
        Gate::H(_) => "─H─",
        Gate::X(_) => "─X─",
        Gate::Z(_) => "─Z─",
        Gate::Mcz(qs) if qs.len() == 1 => "─Z─",
        Gate::Cz(_, _) | Gate::Mcz(_) => "─■─",
        Gate::Measure(_) | Gate::MeasureAll => "─M─",
        Gate::Barrier(_) => "─░─",
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Circuit({}q, {} gates, depth {})",
            self.num_qubits,
            self.gate_count(),
            self.depth()
        )?;
        write!(f, "{}", self.draw())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_gate_bounds() {
        let mut circuit = Circuit::new(2);
        assert!(circuit.add_gate(Gate::H(1)).is_ok());
        assert_eq!(
            circuit.add_gate(Gate::X(2)),
            Err(GroverError::GateQubitMismatch {
                qubit: 2,
                num_qubits: 2
            })
        );
    }

    #[test]
    fn test_empty_mcz_rejected() {
        let mut circuit = Circuit::new(2);
        assert_eq!(
            circuit.add_gate(Gate::Mcz(vec![])),
            Err(GroverError::EmptyGate("mcz".to_string()))
        );
        assert!(circuit.is_empty());
        assert!(Circuit::from_gates(2, vec![Gate::H(0), Gate::Mcz(vec![])]).is_err());
    }

    #[test]
    fn test_depth_ignores_barriers() {
        let circuit = Circuit::from_gates(
            2,
            vec![
                Gate::H(0),
                Gate::H(1),
                Gate::Barrier(vec![0, 1]),
                Gate::Cz(0, 1),
                Gate::MeasureAll,
            ],
        )
        .unwrap();

        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.gate_count(), 5);
    }

    #[test]
    fn test_count_ops() {
        let circuit = Circuit::from_gates(
            3,
            vec![
                Gate::H(0),
                Gate::H(1),
                Gate::Mcz(vec![0, 1, 2]),
                Gate::MeasureAll,
            ],
        )
        .unwrap();

        let ops = circuit.count_ops();
        assert_eq!(ops.get("h"), Some(&2));
        assert_eq!(ops.get("ccz"), Some(&1));
        assert_eq!(ops.get("measure"), Some(&3));
    }

    #[test]
    fn test_to_qasm_header() {
        let circuit = Circuit::from_gates(2, vec![Gate::H(0), Gate::Cz(0, 1)]).unwrap();
        let qasm = circuit.to_qasm();

        assert!(qasm.starts_with("OPENQASM 3.0;"));
        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("bit[2] c;"));
        assert!(qasm.contains("cz q[0], q[1];"));
    }

    #[test]
    fn test_draw_layout() {
        let circuit =
            Circuit::from_gates(3, vec![Gate::H(0), Gate::Cz(0, 2), Gate::X(1)]).unwrap();
        let drawing = circuit.draw();
        let rows: Vec<&str> = drawing.lines().collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "q0: ─H──■────");
        assert_eq!(rows[1], "q1: ────┼──X─");
        assert_eq!(rows[2], "q2: ────■────");
    }
}
