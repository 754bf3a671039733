//! Gate-level simulator
//!
//! Gantree: L2_Sim → GateSimulator
//!
//! Applies the unitary part of a [`Circuit`] to a [`StateVector`]. Used to
//! check that the oracle and diffusion gate networks have the same effect
//! as the direct operators.

use crate::state_vector::StateVector;
use grover_core::{Circuit, Gate, GroverError, GroverResult, QubitId};
use std::f64::consts::FRAC_1_SQRT_2;

/// Ideal gate-by-gate simulator over real amplitudes
/// Gantree: GateSimulator // 게이트 시뮬레이터
#[derive(Debug, Clone, Copy, Default)]
pub struct GateSimulator;

impl GateSimulator {
    /// Create simulator
    pub fn new() -> Self {
        Self
    }

    // ========================================================================
    // Simulation
    // ========================================================================

    /// Run `circuit` from `|0…0⟩`
    pub fn run(&self, circuit: &Circuit) -> GroverResult<StateVector> {
        let mut state = StateVector::new(circuit.num_qubits())?;
        self.apply_circuit(circuit, &mut state)?;
        Ok(state)
    }

    /// Apply every unitary gate of `circuit` to `state`; barriers and
    /// measurements are skipped
    pub fn apply_circuit(&self, circuit: &Circuit, state: &mut StateVector) -> GroverResult<()> {
        if circuit.num_qubits() > state.num_qubits() {
            return Err(GroverError::GateQubitMismatch {
                qubit: circuit.num_qubits() - 1,
                num_qubits: state.num_qubits(),
            });
        }

        for gate in circuit.gates() {
            self.apply_gate(gate, state)?;
        }
        Ok(())
    }

    /// Apply a single gate, checking its qubits against `state`
    pub fn apply_gate(&self, gate: &Gate, state: &mut StateVector) -> GroverResult<()> {
        if matches!(gate, Gate::Mcz(qs) if qs.is_empty()) {
            return Err(GroverError::EmptyGate(gate.name().to_string()));
        }
        if let Some(qubit) = gate.qubits().into_iter().find(|&q| q >= state.num_qubits()) {
            return Err(GroverError::GateQubitMismatch {
                qubit,
                num_qubits: state.num_qubits(),
            });
        }

        let amps = state.amplitudes_mut();
        match gate {
            Gate::H(q) => apply_h(amps, *q),
            Gate::X(q) => apply_single_qubit_gate(amps, *q, |a, b| (b, a)),
            Gate::Z(q) => apply_phase_flip(amps, 1 << q),
            Gate::Cz(a, b) => apply_phase_flip(amps, (1 << a) | (1 << b)),
            Gate::Mcz(qs) => apply_phase_flip(amps, mask_of(qs)),
            Gate::Measure(_) | Gate::MeasureAll | Gate::Barrier(_) => {}
        }
        Ok(())
    }
}

// ============================================================================
// Gate Kernels
// ============================================================================

fn mask_of(qubits: &[QubitId]) -> usize {
    qubits.iter().fold(0, |m, q| m | (1 << q))
}

fn apply_h(state: &mut [f64], q: QubitId) {
    apply_single_qubit_gate(state, q, |a, b| {
        ((a + b) * FRAC_1_SQRT_2, (a - b) * FRAC_1_SQRT_2)
    });
}

fn apply_single_qubit_gate<F>(state: &mut [f64], q: QubitId, f: F)
where
    F: Fn(f64, f64) -> (f64, f64),
{
    let mask = 1 << q;
    for i in 0..state.len() {
        if i & mask == 0 {
            let j = i | mask;
            let (new_i, new_j) = f(state[i], state[j]);
            state[i] = new_i;
            state[j] = new_j;
        }
    }
}

/// Negate every amplitude whose index has all bits of `mask` set
fn apply_phase_flip(state: &mut [f64], mask: usize) {
    for (i, amp) in state.iter_mut().enumerate() {
        if i & mask == mask {
            *amp = -*amp;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
