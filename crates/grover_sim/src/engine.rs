//! Grover engine facade
//!
//! Gantree: L4_Engine → GroverEngine
//!
//! Entry points for callers: validate the target once, then analyse, sample,
//! trace, or describe the circuit. The engine holds only an immutable
//! [`EngineConfig`]; every call owns its own state vector and generator.

use crate::analysis::{optimal_iterations, success_probability, AnalysisReport};
use crate::execution::SearchResult;
use crate::iteration::{IterationController, IterationTrace};
use crate::sampler::MeasurementSampler;
use grover_core::{Circuit, CircuitBuilder, EngineConfig, GroverResult, TargetSpec};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

// ============================================================================
// Report Types
// ============================================================================

/// Circuit statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitSummary {
    /// Number of qubits
    pub num_qubits: usize,

    /// Number of classical bits
    pub num_classical_bits: usize,

    /// Circuit depth (barriers excluded)
    pub circuit_depth: usize,

    /// Total operations (barriers excluded)
    pub total_gates: usize,

    /// Rounds in the circuit
    pub optimal_iterations: usize,
}

/// Gate-level description of a search
/// Gantree: CircuitInfo // 회로 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitInfo {
    /// Target bit string
    pub target_state: String,

    /// Circuit statistics
    pub circuit_info: CircuitSummary,

    /// ASCII diagram
    pub circuit_diagram: String,

    /// Operation counts by gate name
    pub gate_summary: BTreeMap<String, usize>,

    /// OpenQASM 3.0 source
    pub qasm: String,
}

/// One row of the capability example table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleSearch {
    /// Example target
    pub target_state: String,

    /// Search space size
    pub search_space: usize,

    /// Rounds for that size
    pub optimal_iterations: usize,

    /// Approximate success rate, e.g. `"~95%"`
    pub expected_success_rate: String,
}

/// What this engine supports
/// Gantree: Capabilities // 지원 범위
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Algorithm name
    pub algorithm: String,

    /// Crate version
    pub version: String,

    /// Qubit range, e.g. `"1-8"`
    pub supported_qubits: String,

    /// Minimum target length
    pub min_qubits: usize,

    /// Maximum target length
    pub max_qubits: usize,

    /// Minimum shots
    pub min_shots: u64,

    /// Maximum shots
    pub max_shots: u64,

    /// Shots used when none are given
    pub default_shots: u64,

    /// Search complexity
    pub time_complexity: String,

    /// Classical search complexity
    pub classical_complexity: String,

    /// Example searches keyed `"<n>_qubit"`
    pub examples: BTreeMap<String, ExampleSearch>,
}

const EXAMPLE_TARGETS: [&str; 6] = ["1", "11", "101", "1010", "10101", "10101010"];

// ============================================================================
// GroverEngine
// ============================================================================

/// Grover search engine
/// Gantree: GroverEngine // 엔진
#[derive(Debug, Clone, Default)]
pub struct GroverEngine {
    config: EngineConfig,
}

impl GroverEngine {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create from a validated configuration
    pub fn new(config: EngineConfig) -> GroverResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create from environment variables
    pub fn from_env() -> GroverResult<Self> {
        Self::new(EngineConfig::from_env()?)
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate a target bit string against the configured bounds
    pub fn parse_target(&self, bits: &str) -> GroverResult<TargetSpec> {
        self.config.parse_target(bits).map_err(|e| {
            log::warn!("Rejected target state '{}': {}", bits, e);
            e
        })
    }

    fn check_shots(&self, shots: u64) -> GroverResult<u64> {
        self.config.check_shots(shots).map_err(|e| {
            log::warn!("Rejected shot count {}: {}", shots, e);
            e
        })
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Closed-form analysis of a target
    /// Gantree: analyze(bits) -> AnalysisReport // 분석
    pub fn analyze(&self, bits: &str) -> GroverResult<AnalysisReport> {
        let target = self.parse_target(bits)?;
        let report = AnalysisReport::new(&target);

        log::info!(
            "Analysis for {}: {:.1}% theoretical success, {:.2}x speedup",
            target,
            report.analysis.theoretical_success_rate,
            report.analysis.speedup_factor
        );
        Ok(report)
    }

    /// Run the search and sample `shots` measurements
    /// Gantree: simulate_shots(bits, shots) -> SearchResult // 샷 시뮬레이션
    pub fn simulate_shots(&self, bits: &str, shots: u64) -> GroverResult<SearchResult> {
        self.simulate_with(bits, shots, MeasurementSampler::new())
    }

    /// Same as [`simulate_shots`](Self::simulate_shots) with a fixed sampler seed
    pub fn simulate_shots_seeded(
        &self,
        bits: &str,
        shots: u64,
        seed: u64,
    ) -> GroverResult<SearchResult> {
        self.simulate_with(bits, shots, MeasurementSampler::with_seed(seed))
    }

    /// Run the search with the configured default shot count
    pub fn simulate_default(&self, bits: &str) -> GroverResult<SearchResult> {
        self.simulate_shots(bits, self.config.default_shots)
    }

    fn simulate_with(
        &self,
        bits: &str,
        shots: u64,
        mut sampler: MeasurementSampler,
    ) -> GroverResult<SearchResult> {
        let target = self.parse_target(bits)?;
        let shots = self.check_shots(shots)?;

        let started_at = chrono::Utc::now();
        let clock = Instant::now();
        log::info!("Starting Grover search for {} with {} shots", target, shots);

        let controller = IterationController::new(target.clone())?;
        let iterations = controller.optimal_iterations();
        let state = controller.run()?;

        let measurements = sampler.sample(&state.probabilities(), target.num_qubits(), shots)?;
        let target_count = measurements.get(target.bits()).copied().unwrap_or(0);
        let success_rate = target_count as f64 / shots as f64 * 100.0;

        let circuit_depth = grover_circuit(&target, iterations).depth();
        let elapsed_ms = clock.elapsed().as_secs_f64() * 1000.0;

        log::info!(
            "Target {} found {}/{} times ({:.2}% success) in {:.2} ms",
            target,
            target_count,
            shots,
            success_rate,
            elapsed_ms
        );

        Ok(SearchResult {
            target_state: target.bits().to_string(),
            num_qubits: target.num_qubits(),
            optimal_iterations: iterations,
            shots,
            success_rate,
            measurements,
            circuit_depth,
            execution_time_ms: (elapsed_ms * 100.0).round() / 100.0,
            timestamp: started_at.to_rfc3339(),
            seed: sampler.seed(),
        })
    }

    /// Step-by-step probability trace
    /// Gantree: trace_iterations(bits) -> IterationTrace // 반복 추적
    pub fn trace_iterations(&self, bits: &str) -> GroverResult<IterationTrace> {
        let target = self.parse_target(bits)?;
        let trace = IterationController::new(target.clone())?.run_traced()?;

        log::info!(
            "Trace for {}: {} rounds, final P = {:.4}, amplification {:.2}x",
            target,
            trace.optimal_iterations,
            trace.final_target_probability(),
            trace.final_amplification
        );
        Ok(trace)
    }

    /// Gate-level description of the search circuit
    /// Gantree: circuit_info(bits) -> CircuitInfo // 회로 정보
    pub fn circuit_info(&self, bits: &str) -> GroverResult<CircuitInfo> {
        let target = self.parse_target(bits)?;
        let iterations = optimal_iterations(target.num_qubits());
        let circuit = grover_circuit(&target, iterations);

        log::debug!(
            "Circuit for {}: depth {}, {} gates",
            target,
            circuit.depth(),
            circuit.gate_count()
        );

        Ok(CircuitInfo {
            target_state: target.bits().to_string(),
            circuit_info: CircuitSummary {
                num_qubits: circuit.num_qubits(),
                num_classical_bits: circuit.num_clbits(),
                circuit_depth: circuit.depth(),
                total_gates: circuit.gate_count(),
                optimal_iterations: iterations,
            },
            circuit_diagram: circuit.draw(),
            gate_summary: circuit.count_ops(),
            qasm: circuit.to_qasm(),
        })
    }

    /// Supported ranges and an example table
    /// Gantree: capabilities() -> Capabilities // 지원 범위
    pub fn capabilities(&self) -> Capabilities {
        let examples = EXAMPLE_TARGETS
            .iter()
            .filter_map(|bits| self.config.parse_target(bits).ok())
            .map(|target| {
                let n = target.num_qubits();
                let k = optimal_iterations(n);
                let example = ExampleSearch {
                    target_state: target.bits().to_string(),
                    search_space: target.search_space(),
                    optimal_iterations: k,
                    expected_success_rate: format!(
                        "~{:.0}%",
                        (success_probability(n, k) * 100.0).min(100.0)
                    ),
                };
                (format!("{}_qubit", n), example)
            })
            .collect();

        Capabilities {
            algorithm: "Grover's Quantum Search Algorithm".to_string(),
            version: crate::VERSION.to_string(),
            supported_qubits: format!("{}-{}", self.config.min_qubits, self.config.max_qubits),
            min_qubits: self.config.min_qubits,
            max_qubits: self.config.max_qubits,
            min_shots: self.config.min_shots,
            max_shots: self.config.max_shots,
            default_shots: self.config.default_shots,
            time_complexity: "O(√N) where N is the search space size".to_string(),
            classical_complexity: "O(N) for unstructured search".to_string(),
            examples,
        }
    }
}

/// Grover circuit for `target`; the builder only emits in-range qubits
fn grover_circuit(target: &TargetSpec, iterations: usize) -> Circuit {
    CircuitBuilder::with_name(target.num_qubits(), format!("grover_{}", target.bits()))
        .grover(target, iterations)
        .build()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use grover_core::GroverError;

    #[test]
    fn test_identical_validation_everywhere() {
        let engine = GroverEngine::default();
        for bad in ["", "12", "101010101"] {
            let a = engine.analyze(bad).unwrap_err();
            let b = engine.simulate_shots(bad, 1000).unwrap_err();
            let c = engine.trace_iterations(bad).unwrap_err();
            let d = engine.circuit_info(bad).unwrap_err();
            assert_eq!(a, b);
            assert_eq!(b, c);
            assert_eq!(c, d);
            assert!(a.is_validation_error());
        }
    }

    #[test]
    fn test_shot_bounds() {
        let engine = GroverEngine::default();
        assert!(matches!(
            engine.simulate_shots("11", 99),
            Err(GroverError::ShotsOutOfRange { shots: 99, .. })
        ));
        assert!(engine.simulate_shots("11", 10_001).is_err());
        assert!(engine.simulate_shots_seeded("11", 100, 0).is_ok());
    }

    #[test]
    fn test_simulate_two_qubits() {
        let engine = GroverEngine::default();
        let result = engine.simulate_shots("11", 1000).unwrap();

        assert_eq!(result.total_counts(), 1000);
        assert!(result.target_count() > 900);
        assert_eq!(result.optimal_iterations, 1);
        assert!(result.circuit_depth > 0);
        assert!(chrono::DateTime::parse_from_rfc3339(&result.timestamp).is_ok());
    }

    #[test]
    fn test_seeded_runs_match() {
        let engine = GroverEngine::default();
        let a = engine.simulate_shots_seeded("0110", 2000, 11).unwrap();
        let b = engine.simulate_shots_seeded("0110", 2000, 11).unwrap();

        assert_eq!(a.measurements, b.measurements);
        assert_eq!(a.seed, Some(11));
        assert_relative_eq!(a.success_rate, b.success_rate);
    }

    #[test]
    fn test_default_shots() {
        let engine = GroverEngine::new(EngineConfig::default().with_default_shots(250)).unwrap();
        assert_eq!(engine.simulate_default("10").unwrap().shots, 250);
    }

    #[test]
    fn test_circuit_info() {
        let engine = GroverEngine::default();
        let info = engine.circuit_info("11").unwrap();

        assert_eq!(info.circuit_info.num_qubits, 2);
        assert_eq!(info.circuit_info.num_classical_bits, 2);
        assert_eq!(info.circuit_info.optimal_iterations, 1);
        assert_eq!(info.gate_summary.get("cz"), Some(&2));
        assert_eq!(info.circuit_diagram.lines().count(), 2);
        assert!(info.qasm.starts_with("OPENQASM 3.0;"));
    }

    #[test]
    fn test_capabilities_follow_config() {
        let caps = GroverEngine::default().capabilities();
        assert_eq!(caps.supported_qubits, "1-8");
        assert_eq!(caps.examples.len(), 6);
        assert_eq!(caps.examples["3_qubit"].optimal_iterations, 2);
        assert_eq!(caps.examples["3_qubit"].expected_success_rate, "~95%");
        assert_eq!(caps.examples["8_qubit"].optimal_iterations, 12);

        let narrow = GroverEngine::new(EngineConfig::default().with_qubit_range(2, 4))
            .unwrap()
            .capabilities();
        assert_eq!(narrow.supported_qubits, "2-4");
        let keys: Vec<_> = narrow.examples.keys().cloned().collect();
        assert_eq!(keys, vec!["2_qubit", "3_qubit", "4_qubit"]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_shot_range(500, 100);
        assert!(GroverEngine::new(config).is_err());
    }
}
