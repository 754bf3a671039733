//! Grover requests for remote hardware
//!
//! Gantree: L5_Hardware → Request
//!
//! Validates a 2-qubit search, turns it into a tagged sampler submission,
//! and folds provider counts back into a report.

use crate::job::{HardwareJob, JobError, JobManager, JobParams, JobResult, JobStatus, JobSubmission};
use chrono::Utc;
use grover_core::constants::hardware;
use grover_core::{
    basis_label, Circuit, CircuitBuilder, Counts, GroverError, GroverResult, TargetSpec,
};
use serde::Serialize;

const TARGET_TAG: &str = "target:";
const SHOTS_TAG: &str = "shots:";

// ============================================================================
// Request
// ============================================================================

/// Validated 2-qubit hardware search
/// Gantree: HardwareGroverRequest // 하드웨어 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardwareGroverRequest {
    target: TargetSpec,
    shots: u64,
}

impl HardwareGroverRequest {
    /// Validate target and shots (`None` takes the default)
    pub fn new(bits: &str, shots: Option<u64>) -> GroverResult<Self> {
        let target = TargetSpec::new(bits, hardware::HARDWARE_QUBITS, hardware::HARDWARE_QUBITS)?;
        let shots = shots.unwrap_or(hardware::DEFAULT_SHOTS);
        if !(hardware::MIN_SHOTS..=hardware::MAX_SHOTS).contains(&shots) {
            return Err(GroverError::ShotsOutOfRange {
                shots,
                min: hardware::MIN_SHOTS,
                max: hardware::MAX_SHOTS,
            });
        }
        Ok(Self { target, shots })
    }

    /// Target
    pub fn target(&self) -> &TargetSpec {
        &self.target
    }

    /// Shots
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Single-round Grover circuit (one round is exact for 2 qubits)
    pub fn circuit(&self) -> Circuit {
        CircuitBuilder::with_name(hardware::HARDWARE_QUBITS, format!("grover_{}", self.target.bits()))
            .grover(&self.target, 1)
            .build()
    }

    /// Tags identifying the run on the provider side
    pub fn tags(&self) -> Vec<String> {
        vec![
            format!("{}{}", TARGET_TAG, self.target.bits()),
            format!("{}{}", SHOTS_TAG, self.shots),
        ]
    }

    /// Sampler submission for `backend`
    pub fn to_submission(&self, backend: &str) -> JobSubmission {
        JobSubmission {
            program_id: "sampler".to_string(),
            backend: backend.to_string(),
            params: JobParams::new(vec![self.circuit().to_qasm()]).with_shots(self.shots),
            tags: self.tags(),
        }
    }
}

/// Target bits recorded in job tags
pub fn target_from_tags(tags: &[String]) -> Option<String> {
    tags.iter()
        .find_map(|t| t.strip_prefix(TARGET_TAG))
        .map(str::to_string)
}

/// Counts keyed by fixed-width bit strings
///
/// Hex keys (`0x3`) are expanded to `width` bits; binary keys pass through.
pub fn normalize_counts(raw: &Counts, width: usize) -> Counts {
    let mut counts = Counts::new();
    for (key, &count) in raw {
        let label = match key.strip_prefix("0x") {
            Some(hex) => match usize::from_str_radix(hex, 16) {
                Ok(index) => basis_label(index, width),
                Err(_) => key.clone(),
            },
            None => key.clone(),
        };
        *counts.entry(label).or_insert(0) += count;
    }
    counts
}

// ============================================================================
// Report
// ============================================================================

/// Measured outcome of a finished hardware job
/// Gantree: HardwareResults // 하드웨어 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardwareResults {
    /// Observed outcomes (basis string -> count)
    pub counts: Counts,

    /// Percentage of shots that landed on the target
    pub success_rate: f64,

    /// Target bit string, when it could be recovered from the tags
    pub target_state: Option<String>,

    /// Total shots in the counts
    pub total_shots: u64,

    /// Provider-reported execution time, milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time_ms: Option<f64>,

    /// Time the report was assembled, RFC 3339 UTC
    pub timestamp: String,
}

impl HardwareResults {
    /// Fold provider results into a report; `None` without counts
    pub fn from_job_result(target: Option<&str>, result: &JobResult) -> Option<Self> {
        let raw = result.first_counts()?;
        let width = target.map(str::len).unwrap_or(hardware::HARDWARE_QUBITS);
        let counts = normalize_counts(raw, width);

        let total_shots: u64 = counts.values().sum();
        let hits = target
            .and_then(|t| counts.get(t))
            .copied()
            .unwrap_or(0);
        let success_rate = if total_shots > 0 {
            hits as f64 / total_shots as f64 * 100.0
        } else {
            0.0
        };

        let execution_time_ms = result
            .metadata
            .as_ref()
            .and_then(|m| m.time_taken)
            .or_else(|| result.results.first().and_then(|r| r.time_taken))
            .map(|s| s * 1000.0);

        Some(Self {
            counts,
            success_rate,
            target_state: target.map(str::to_string),
            total_shots,
            execution_time_ms,
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}

/// Status report for a hardware job
/// Gantree: HardwareJobReport // 작업 보고서
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardwareJobReport {
    /// Job ID
    pub job_id: String,

    /// Current status
    pub status: JobStatus,

    /// Backend name
    pub backend_name: String,

    /// Creation time, RFC 3339
    pub creation_date: Option<String>,

    /// Position in the provider queue, while queued
    pub queue_position: Option<u64>,

    /// Provider-reported reason, once the job has failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Results, once the job has completed
    pub results: Option<HardwareResults>,
}

impl HardwareJobReport {
    /// Snapshot of `job` as last refreshed
    pub fn from_job(job: &HardwareJob, results: Option<HardwareResults>) -> Self {
        Self {
            job_id: job.id().to_string(),
            status: job.status(),
            backend_name: job.backend().to_string(),
            creation_date: job.created().map(|c| c.to_rfc3339()),
            queue_position: job.queue_position(),
            error: job.failure_reason().map(str::to_string),
            results,
        }
    }
}

// ============================================================================
// Submission + Reporting
// ============================================================================

impl JobManager {
    /// Submit a Grover search to `backend`
    pub async fn submit_grover(
        &self,
        backend: &str,
        request: &HardwareGroverRequest,
    ) -> Result<HardwareJob, JobError> {
        log::info!(
            "Submitting Grover search for |{}> ({} shots) to {}",
            request.target().bits(),
            request.shots(),
            backend
        );
        self.submit(request.to_submission(backend)).await
    }
}

impl HardwareJob {
    /// Refresh and report; results are fetched once the job completed
    ///
    /// Failed and cancelled jobs still produce a report carrying their status.
    pub async fn report(&mut self) -> Result<HardwareJobReport, JobError> {
        let status = self.refresh().await?;

        let results = if status.is_success() {
            let result = self.result().await?;
            let target = target_from_tags(self.tags());
            let results = HardwareResults::from_job_result(target.as_deref(), &result);
            if results.is_none() {
                log::warn!("Job {} completed without counts", self.id());
            }
            results
        } else {
            None
        };

        Ok(HardwareJobReport::from_job(self, results))
    }
}
