//! Property-based tests for the Grover simulation.
//!
//! Checks the laws that must hold for every supported qubit count and every
//! target: normalization, amplification, agreement between the closed-form
//! analysis and the simulated trace, and agreement between the gate networks
//! and the direct operators.

use approx::assert_relative_eq;
use grover_core::{basis_label, CircuitBuilder, TargetSpec};
use grover_sim::{
    diffusion, grover_round, optimal_iterations, oracle, AnalysisResult, GateSimulator,
    GroverEngine, IterationController, MeasurementSampler, StateVector,
};
use proptest::prelude::*;

/// Random valid target of 1-8 bits.
fn arb_target() -> impl Strategy<Value = TargetSpec> {
    (1_usize..=8).prop_flat_map(|n| {
        (0..(1_usize << n)).prop_map(move |index| {
            TargetSpec::parse(&basis_label(index, n)).expect("generated target is valid")
        })
    })
}

proptest! {
    #[test]
    fn uniform_init_is_flat(n in 1_usize..=8) {
        let state = StateVector::uniform(n).unwrap();
        let expected = 1.0 / (1_usize << n) as f64;
        for p in state.probabilities() {
            prop_assert!((p - expected).abs() <= 1e-9);
        }
    }

    #[test]
    fn rounds_preserve_normalization(target in arb_target()) {
        let mut state = StateVector::uniform(target.num_qubits()).unwrap();
        for _ in 0..optimal_iterations(target.num_qubits()) {
            grover_round(&mut state, target.index()).unwrap();
            prop_assert!(state.is_normalized(1e-9));
        }
    }

    #[test]
    fn target_index_matches_bits(target in arb_target()) {
        prop_assert_eq!(basis_label(target.index(), target.num_qubits()), target.bits());
    }

    #[test]
    fn amplification_is_monotonic(target in arb_target()) {
        let trace = IterationController::new(target).unwrap().run_traced().unwrap();
        let initial = trace.steps[0].target_probability;
        prop_assert!(trace.final_target_probability() >= initial - 1e-12);
    }

    #[test]
    fn analysis_matches_trace(target in arb_target()) {
        let n = target.num_qubits();
        let analysis = AnalysisResult::compute(n);
        let trace = IterationController::new(target).unwrap().run_traced().unwrap();

        prop_assert_eq!(analysis.optimal_iterations, trace.optimal_iterations);
        prop_assert!(
            (analysis.theoretical_success_rate - trace.final_target_probability() * 100.0).abs()
                <= 1e-9
        );
    }

    #[test]
    fn oracle_network_is_exact(target in arb_target()) {
        let n = target.num_qubits();
        let circuit = CircuitBuilder::new(n).phase_oracle(&target).build();

        let mut direct = StateVector::uniform(n).unwrap();
        oracle(&mut direct, target.index()).unwrap();

        let mut via_gates = StateVector::uniform(n).unwrap();
        GateSimulator::new().apply_circuit(&circuit, &mut via_gates).unwrap();

        prop_assert_eq!(direct.amplitudes(), via_gates.amplitudes());
    }

    #[test]
    fn diffusion_network_matches_up_to_sign(target in arb_target()) {
        let n = target.num_qubits();
        let mut direct = StateVector::uniform(n).unwrap();
        oracle(&mut direct, target.index()).unwrap();
        let mut via_gates = direct.clone();

        diffusion(&mut direct);
        let circuit = CircuitBuilder::new(n).diffusion().build();
        GateSimulator::new().apply_circuit(&circuit, &mut via_gates).unwrap();

        for (a, b) in via_gates.amplitudes().iter().zip(direct.amplitudes()) {
            prop_assert!((a + b).abs() <= 1e-12);
        }
    }

    #[test]
    fn counts_sum_to_shots(target in arb_target(), shots in 100_u64..=10_000, seed in any::<u64>()) {
        let result = GroverEngine::default()
            .simulate_shots_seeded(target.bits(), shots, seed)
            .unwrap();
        prop_assert_eq!(result.total_counts(), shots);
        prop_assert!(result.measurements.keys().all(|k| k.len() == target.num_qubits()));
    }
}

#[test]
fn large_shot_frequencies_converge() {
    let target = TargetSpec::parse("101").unwrap();
    let state = IterationController::new(target).unwrap().run().unwrap();
    let distribution = state.probabilities();

    let shots = 200_000;
    let counts = MeasurementSampler::with_seed(2024)
        .sample(&distribution, 3, shots)
        .unwrap();

    for (i, p) in distribution.iter().enumerate() {
        let observed = counts.get(&basis_label(i, 3)).copied().unwrap_or(0) as f64 / shots as f64;
        assert_relative_eq!(observed, *p, epsilon = 0.01);
    }
}
