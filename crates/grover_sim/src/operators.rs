//! Grover operators on the amplitude vector
//!
//! Gantree: L2_Sim → Operators
//!
//! The mathematical effect of the oracle and the diffusion operator, applied
//! directly. The gate networks that realise them live in
//! [`grover_core::CircuitBuilder`] and are checked against these.

use crate::state_vector::StateVector;
use grover_core::{GroverError, GroverResult};

/// Negate the amplitude of the marked index
/// Gantree: oracle(state, target) // 오라클
pub fn oracle(state: &mut StateVector, target_index: usize) -> GroverResult<()> {
    let dimension = state.dimension();
    let amp = state
        .amplitudes_mut()
        .get_mut(target_index)
        .ok_or(GroverError::IndexOutOfRange {
            index: target_index,
            dimension,
        })?;
    *amp = -*amp;
    Ok(())
}

/// Inversion about the mean: `a[i] = 2·mean − a[i]`
/// Gantree: diffusion(state) // 확산
pub fn diffusion(state: &mut StateVector) {
    let amplitudes = state.amplitudes_mut();
    let mean = amplitudes.iter().sum::<f64>() / amplitudes.len() as f64;
    for a in amplitudes.iter_mut() {
        *a = 2.0 * mean - *a;
    }
}

/// One Grover round: oracle, then diffusion
pub fn grover_round(state: &mut StateVector, target_index: usize) -> GroverResult<()> {
    oracle(state, target_index)?;
    diffusion(state);
    Ok(())
}
