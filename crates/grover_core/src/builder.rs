//! Circuit builder for Grover
//!
//! Gantree: L1_Circuit → CircuitBuilder
//!
//! Fluent builder for Grover circuits: primitive gates, layers, and the
//! phase oracle / diffusion networks.

use crate::circuit::Circuit;
use crate::error::GroverResult;
use crate::gate::Gate;
use crate::types::{QubitId, TargetSpec};

/// Fluent circuit builder (consuming self pattern)
/// Gantree: CircuitBuilder // 빌더 패턴
///
/// Gate placement errors do not interrupt the chain; the first one is kept
/// and reported by [`CircuitBuilder::try_build`].
pub struct CircuitBuilder {
    /// Internal circuit being built
    circuit: Circuit,

    /// First gate placement error, if any
    error: Option<crate::error::GroverError>,
}

impl CircuitBuilder {
    // ========================================================================
    // Constructor
    // ========================================================================

    /// Create a new circuit builder
    /// Gantree: new(n) -> Self // 생성자
    pub fn new(num_qubits: usize) -> Self {
        Self {
            circuit: Circuit::new(num_qubits),
            error: None,
        }
    }

    /// Create with circuit name
    pub fn with_name(num_qubits: usize, name: impl Into<String>) -> Self {
        Self {
            circuit: Circuit::with_name(num_qubits, name),
            error: None,
        }
    }

    fn push(mut self, gate: Gate) -> Self {
        if let Err(e) = self.circuit.add_gate(gate) {
            self.error.get_or_insert(e);
        }
        self
    }

    // ========================================================================
    // Primitive Gates
    // ========================================================================

    /// Add Hadamard gate
    pub fn h(self, qubit: QubitId) -> Self {
        self.push(Gate::H(qubit))
    }

    /// Add Pauli-X gate
    pub fn x(self, qubit: QubitId) -> Self {
        self.push(Gate::X(qubit))
    }

    /// Add Pauli-Z gate
    pub fn z(self, qubit: QubitId) -> Self {
        self.push(Gate::Z(qubit))
    }

    /// Add CZ gate
    pub fn cz(self, a: QubitId, b: QubitId) -> Self {
        self.push(Gate::Cz(a, b))
    }

    /// Add multi-controlled Z over `qubits`
    pub fn mcz(self, qubits: Vec<QubitId>) -> Self {
        self.push(Gate::Mcz(qubits))
    }

    /// Add measurement on all qubits
    /// Gantree: measure_all(self) -> Self // 전체 측정
    pub fn measure_all(self) -> Self {
        self.push(Gate::MeasureAll)
    }

    /// Add barrier across the register
    pub fn barrier(self) -> Self {
        let qubits: Vec<QubitId> = (0..self.circuit.num_qubits()).collect();
        self.push(Gate::Barrier(qubits))
    }

    // ========================================================================
    // Layer Operations
    // ========================================================================

    /// Add Hadamard layer on all qubits
    pub fn h_layer(self) -> Self {
        (0..self.circuit.num_qubits()).fold(self, |b, q| b.h(q))
    }

    /// Add X layer on all qubits
    pub fn x_layer(self) -> Self {
        (0..self.circuit.num_qubits()).fold(self, |b, q| b.x(q))
    }

    /// Phase flip of the all-ones state, using the narrowest named gate
    pub fn all_ones_phase(self) -> Self {
        match self.circuit.num_qubits() {
            0 => self,
            1 => self.z(0),
            2 => self.cz(0, 1),
            n => self.mcz((0..n).collect()),
        }
    }

    // ========================================================================
    // Grover Operators
    // ========================================================================

    /// Phase oracle marking `target`
    /// Gantree: phase_oracle(self, target) -> Self // 오라클
    ///
    /// X on every qubit whose target bit is 0 maps the target to the
    /// all-ones state, which the multi-controlled Z then flips.
    pub fn phase_oracle(self, target: &TargetSpec) -> Self {
        let zeros: Vec<QubitId> = (0..target.num_qubits())
            .filter(|&q| !target.bit(q))
            .collect();

        let builder = zeros.iter().fold(self, |b, &q| b.x(q));
        let builder = builder.all_ones_phase();
        zeros.iter().fold(builder, |b, &q| b.x(q))
    }

    /// Diffusion network H·X·MCZ·X·H (inversion about the mean, up to global phase)
    /// Gantree: diffusion(self) -> Self // 확산
    pub fn diffusion(self) -> Self {
        self.h_layer().x_layer().all_ones_phase().x_layer().h_layer()
    }

    /// Complete Grover search: superposition, `iterations` rounds, measurement
    /// Gantree: grover(self, target, k) -> Self // 전체 회로
    pub fn grover(self, target: &TargetSpec, iterations: usize) -> Self {
        let builder = self.h_layer();
        (0..iterations)
            .fold(builder, |b, _| b.phase_oracle(target).diffusion().barrier())
            .measure_all()
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build and return the circuit, dropping any rejected gates
    /// Gantree: build(self) -> Circuit // 빌드
    pub fn build(self) -> Circuit {
        self.circuit
    }

    /// Build, failing on the first rejected gate
    pub fn try_build(self) -> GroverResult<Circuit> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.circuit),
        }
    }

    /// Get reference to current circuit state
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Get number of qubits
    pub fn num_qubits(&self) -> usize {
        self.circuit.num_qubits()
    }
}

// ============================================================================
// Tests
// ============================================================================
