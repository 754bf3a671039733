//! Iteration controller
//!
//! Gantree: L2_Sim → IterationController
//!
//! Drives the uniform superposition through the optimal number of
//! oracle/diffusion rounds, optionally recording a probability snapshot
//! after every operator.

use crate::analysis::optimal_iterations;
use crate::operators::{diffusion, oracle};
use crate::state_vector::StateVector;
use grover_core::{GroverResult, ProbabilityMap, TargetSpec};
use serde::Serialize;
use std::fmt;

// ============================================================================
// Step Types
// ============================================================================

/// Point in the run a snapshot was taken
/// Gantree: StepKind // 단계 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepKind {
    /// Before any round
    #[serde(rename = "Initial Superposition")]
    InitialSuperposition,

    /// After the oracle of a round
    #[serde(rename = "After Oracle")]
    AfterOracle,

    /// After the diffusion of a round
    #[serde(rename = "After Diffusion")]
    AfterDiffusion,
}

impl StepKind {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::InitialSuperposition => "Initial Superposition",
            StepKind::AfterOracle => "After Oracle",
            StepKind::AfterDiffusion => "After Diffusion",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Probability snapshot
/// Gantree: IterationStep // 단계 기록
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationStep {
    /// Which operator just ran
    pub step_name: StepKind,

    /// Round number (0 = initial superposition)
    pub iteration_number: usize,

    /// Probability of every basis state
    pub probabilities: ProbabilityMap,

    /// Probability of the marked state
    pub target_probability: f64,
}

impl IterationStep {
    fn capture(
        kind: StepKind,
        round: usize,
        state: &StateVector,
        target: usize,
    ) -> GroverResult<Self> {
        Ok(Self {
            step_name: kind,
            iteration_number: round,
            probabilities: state.probability_map(),
            target_probability: state.probability_of(target)?,
        })
    }
}

/// Full ordered trace of a run
/// Gantree: IterationTrace // 전체 추적
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationTrace {
    /// Target bit string
    pub target_state: String,

    /// Number of qubits
    pub num_qubits: usize,

    /// Rounds applied
    pub optimal_iterations: usize,

    /// Search space size (2^n)
    pub search_space_size: usize,

    /// Snapshots: initial, then oracle/diffusion per round
    pub steps: Vec<IterationStep>,

    /// Final target probability over the uniform 1/N
    pub final_amplification: f64,
}

impl IterationTrace {
    /// Target probability after the last step
    pub fn final_target_probability(&self) -> f64 {
        self.steps
            .last()
            .map(|s| s.target_probability)
            .unwrap_or(0.0)
    }

    /// Target probability at each recorded step
    pub fn target_probabilities(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.target_probability).collect()
    }
}

// ============================================================================
// IterationController
// ============================================================================

/// Owns one run's state vector
/// Gantree: IterationController // 반복 제어
pub struct IterationController {
    target: TargetSpec,
    optimal_iterations: usize,
    state: StateVector,
}

impl IterationController {
    /// Allocate the state for a validated target
    pub fn new(target: TargetSpec) -> GroverResult<Self> {
        let state = StateVector::new(target.num_qubits())?;
        Ok(Self {
            optimal_iterations: optimal_iterations(target.num_qubits()),
            target,
            state,
        })
    }

    /// Rounds this run will apply
    pub fn optimal_iterations(&self) -> usize {
        self.optimal_iterations
    }

    /// Target being searched
    pub fn target(&self) -> &TargetSpec {
        &self.target
    }

    /// Run all rounds and return the final state
    /// Gantree: run(self) -> StateVector // 실행
    pub fn run(mut self) -> GroverResult<StateVector> {
        self.execute(None)?;
        Ok(self.state)
    }

    /// Run all rounds, recording every step
    /// Gantree: run_traced(self) -> IterationTrace // 추적 실행
    pub fn run_traced(mut self) -> GroverResult<IterationTrace> {
        let mut steps = Vec::with_capacity(2 * self.optimal_iterations + 1);
        self.execute(Some(&mut steps))?;

        let search_space_size = self.target.search_space();
        let final_probability = self.state.probability_of(self.target.index())?;

        Ok(IterationTrace {
            target_state: self.target.bits().to_string(),
            num_qubits: self.target.num_qubits(),
            optimal_iterations: self.optimal_iterations,
            search_space_size,
            steps,
            final_amplification: final_probability * search_space_size as f64,
        })
    }

    fn execute(&mut self, mut trace: Option<&mut Vec<IterationStep>>) -> GroverResult<()> {
        let target = self.target.index();
        self.state.uniform_init();

        if let Some(steps) = trace.as_mut() {
            steps.push(IterationStep::capture(
                StepKind::InitialSuperposition,
                0,
                &self.state,
                target,
            )?);
        }

        for round in 1..=self.optimal_iterations {
            oracle(&mut self.state, target)?;
            if let Some(steps) = trace.as_mut() {
                steps.push(IterationStep::capture(
                    StepKind::AfterOracle,
                    round,
                    &self.state,
                    target,
                )?);
            }

            diffusion(&mut self.state);
            if let Some(steps) = trace.as_mut() {
                steps.push(IterationStep::capture(
                    StepKind::AfterDiffusion,
                    round,
                    &self.state,
                    target,
                )?);
            }

            log::debug!(
                "Round {}/{}: P({}) = {:.6}",
                round,
                self.optimal_iterations,
                self.target.bits(),
                self.state.probability_of(target)?
            );
        }

        Ok(())
    }
}
