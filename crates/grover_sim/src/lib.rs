//! # Grover Sim
//!
//! Classical simulation of Grover's search: real-amplitude state evolution,
//! closed-form analysis, and shot sampling.
//!
//! ## Gantree Architecture
//!
//! ```text
//! grover_sim // L2-L4: Simulation + Analysis + Engine (완료)
//!     L2_Sim // 상태 진화 (완료)
//!         StateVector // 실수 진폭 벡터 (완료)
//!         Operators // 오라클/확산 (완료)
//!         IterationController // 반복 제어 + 추적 (완료)
//!         GateSimulator // 게이트 수준 검증 (완료)
//!     L3_Analysis // 이론 분석 (완료)
//!         AnalysisCalculator // 성공 확률/속도 향상 (완료)
//!     L3_Measure // 측정 (완료)
//!         MeasurementSampler // 샷 샘플링 (완료)
//!     L4_Engine // 파사드 (완료)
//!         SearchResult // 검색 결과 (완료)
//!         GroverEngine // 엔진 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use grover_sim::prelude::*;
//!
//! let engine = GroverEngine::default();
//!
//! let analysis = engine.analyze("101").unwrap();
//! assert_eq!(analysis.analysis.optimal_iterations, 2);
//!
//! let result = engine.simulate_shots_seeded("101", 1000, 42).unwrap();
//! assert_eq!(result.total_counts(), 1000);
//! println!("{}", result);
//! ```
//!
//! ## Tracing
//!
//! ```rust
//! use grover_sim::prelude::*;
//!
//! let trace = GroverEngine::default().trace_iterations("11").unwrap();
//! for step in &trace.steps {
//!     println!("{} (round {}): {:.3}", step.step_name, step.iteration_number, step.target_probability);
//! }
//! assert!((trace.final_amplification - 4.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// State vector (Gantree: L2_Sim → StateVector)
pub mod state_vector;

/// Oracle and diffusion operators (Gantree: L2_Sim → Operators)
pub mod operators;

/// Iteration controller and trace (Gantree: L2_Sim → IterationController)
pub mod iteration;

/// Gate-level simulator (Gantree: L2_Sim → GateSimulator)
pub mod gate_sim;

/// Closed-form analysis (Gantree: L3_Analysis → AnalysisCalculator)
pub mod analysis;

/// Measurement sampler (Gantree: L3_Measure → MeasurementSampler)
pub mod sampler;

/// Search results (Gantree: L4_Engine → SearchResult)
pub mod execution;

/// Engine facade (Gantree: L4_Engine → GroverEngine)
pub mod engine;

// ============================================================================
// Re-exports
// ============================================================================

pub use analysis::{
    optimal_iterations, success_probability, AnalysisReport, AnalysisResult,
    PerformanceComparison,
};
pub use engine::{Capabilities, CircuitInfo, CircuitSummary, ExampleSearch, GroverEngine};
pub use execution::SearchResult;
pub use gate_sim::GateSimulator;
pub use iteration::{IterationController, IterationStep, IterationTrace, StepKind};
pub use operators::{diffusion, grover_round, oracle};
pub use sampler::MeasurementSampler;
pub use state_vector::StateVector;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use grover_sim::prelude::*;
    //! ```

    pub use crate::analysis::{optimal_iterations, AnalysisReport, AnalysisResult};
    pub use crate::engine::{Capabilities, CircuitInfo, GroverEngine};
    pub use crate::execution::SearchResult;
    pub use crate::gate_sim::GateSimulator;
    pub use crate::iteration::{IterationController, IterationStep, IterationTrace, StepKind};
    pub use crate::sampler::MeasurementSampler;
    pub use crate::state_vector::StateVector;
    pub use grover_core::{EngineConfig, GroverError, GroverResult, TargetSpec};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_concrete_scenarios() {
        let engine = GroverEngine::default();

        let t = engine.trace_iterations("11").unwrap();
        assert_eq!(t.optimal_iterations, 1);
        assert_relative_eq!(t.final_target_probability(), 1.0, epsilon = 1e-9);

        let a = engine.analyze("101").unwrap();
        assert_eq!(a.analysis.search_space_size, 8);
        assert_eq!(a.analysis.optimal_iterations, 2);
        assert_relative_eq!(a.analysis.classical_average_tries, 4.0);
        assert_relative_eq!(a.analysis.speedup_factor, 2.0);
        assert!(a.analysis.theoretical_success_rate >= 94.5);
        assert!(a.analysis.theoretical_success_rate <= 96.5);

        let zero = TargetSpec::parse("000").unwrap();
        assert_eq!(zero.index(), 0);
        assert_eq!(engine.trace_iterations("000").unwrap().optimal_iterations, 2);
        assert_eq!(TargetSpec::parse("101").unwrap().index(), 5);
    }

    #[test]
    fn test_one_qubit_scenario() {
        let engine = GroverEngine::default();
        let t = engine.trace_iterations("1").unwrap();
        let a = AnalysisResult::compute(1);

        assert_eq!(t.optimal_iterations, 1);
        assert_relative_eq!(t.final_target_probability(), 0.5, epsilon = 1e-9);
        assert_relative_eq!(a.theoretical_success_rate, 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_simulate_11_finds_target() {
        let result = GroverEngine::default().simulate_shots("11", 1000).unwrap();
        assert_eq!(result.total_counts(), 1000);
        assert!(result.target_count() > 900);
        assert!(result.found_target());
    }

    #[test]
    fn test_iteration_count_agrees_across_operations() {
        let engine = GroverEngine::default();
        for bits in ["0", "10", "111", "0101", "10011", "110010", "1010101", "11111111"] {
            let k = engine.analyze(bits).unwrap().analysis.optimal_iterations;
            assert_eq!(engine.trace_iterations(bits).unwrap().optimal_iterations, k);
            assert_eq!(
                engine.simulate_shots_seeded(bits, 100, 1).unwrap().optimal_iterations,
                k
            );
            assert_eq!(engine.circuit_info(bits).unwrap().circuit_info.optimal_iterations, k);
        }
    }

    #[test]
    fn test_gate_circuit_reproduces_final_distribution() {
        use grover_core::CircuitBuilder;

        let target = TargetSpec::parse("1011").unwrap();
        let k = optimal_iterations(4);
        let circuit = CircuitBuilder::new(4).grover(&target, k).build();

        let via_gates = GateSimulator::new().run(&circuit).unwrap();
        let direct = IterationController::new(target).unwrap().run().unwrap();

        for (p, q) in via_gates.probabilities().iter().zip(direct.probabilities()) {
            assert_relative_eq!(*p, q, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_engine_shared_across_threads() {
        use std::sync::Arc;
        use std::thread;

        let engine = Arc::new(GroverEngine::default());
        let handles: Vec<_> = ["01", "110", "1001"]
            .into_iter()
            .map(|bits| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || engine.simulate_shots(bits, 500).map(|r| r.total_counts()))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), 500);
        }
    }

    #[test]
    fn test_trace_json_shape() {
        let trace = GroverEngine::default().trace_iterations("101").unwrap();
        let json = serde_json::to_value(&trace).unwrap();

        assert_eq!(json["target_state"], "101");
        assert_eq!(json["num_qubits"], 3);
        assert_eq!(json["optimal_iterations"], 2);
        assert_eq!(json["steps"].as_array().map(Vec::len), Some(5));
        assert!(json["steps"][0]["probabilities"]["101"].is_number());
    }
}
