//! Provider job management
//!
//! Gantree: L5_Hardware → Job
//!
//! Submission, status polling, and result retrieval for sampler jobs.

use crate::client::{is_not_found, ClientError, ProviderClient};
use chrono::{DateTime, Utc};
use grover_core::constants::hardware;
use grover_core::Counts;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Job errors
#[derive(Debug, Error)]
pub enum JobError {
    /// Client error
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Job submission failed
    #[error("Job submission failed: {0}")]
    SubmissionFailed(String),

    /// Job execution failed
    #[error("Job execution failed: {0}")]
    ExecutionFailed(String),

    /// Job cancelled
    #[error("Job was cancelled")]
    Cancelled,

    /// Job timeout
    #[error("Job timed out after {0} seconds")]
    Timeout(u64),

    /// Result not available
    #[error("Job results not yet available")]
    ResultsNotReady,
}

/// Job status
/// Gantree: JobStatus // 작업 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    /// Job is queued
    #[serde(alias = "queued", alias = "Queued", alias = "PENDING", alias = "pending")]
    Queued,

    /// Job is validating
    #[serde(alias = "validating", alias = "Validating")]
    Validating,

    /// Job is running
    #[serde(alias = "running", alias = "Running")]
    Running,

    /// Job completed successfully
    #[serde(alias = "completed", alias = "Completed", alias = "DONE", alias = "done")]
    Completed,

    /// Job failed
    #[serde(alias = "failed", alias = "Failed", alias = "ERROR", alias = "error")]
    Failed,

    /// Job was cancelled
    #[serde(alias = "cancelled", alias = "Cancelled", alias = "CANCELED", alias = "canceled")]
    Cancelled,

    /// Unknown status
    #[serde(other)]
    Unknown,
}

impl JobStatus {
    /// Parse a free-form status label, case-insensitively
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_uppercase().as_str() {
            "QUEUED" | "PENDING" => Self::Queued,
            "VALIDATING" => Self::Validating,
            "RUNNING" => Self::Running,
            "COMPLETED" | "DONE" => Self::Completed,
            "FAILED" | "ERROR" => Self::Failed,
            "CANCELLED" | "CANCELED" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    /// Check if job is in terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }

    /// Check if job is still running
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Queued | Self::Validating | Self::Running)
    }

    /// Check if job completed successfully
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Job submission request
#[derive(Debug, Clone, Serialize)]
pub struct JobSubmission {
    /// Program ID (e.g., "sampler")
    pub program_id: String,

    /// Backend name
    pub backend: String,

    /// Input parameters
    pub params: JobParams,

    /// Job tags
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Job parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobParams {
    /// Circuits (as OpenQASM strings)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub circuits: Vec<String>,

    /// Number of shots
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shots: Option<u64>,

    /// Optimization level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimization_level: Option<u8>,

    /// Seed for the provider-side transpiler
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_transpiler: Option<u64>,
}

impl Default for JobParams {
    fn default() -> Self {
        Self {
            circuits: Vec::new(),
            shots: Some(hardware::DEFAULT_SHOTS),
            optimization_level: Some(2),
            seed_transpiler: Some(42),
        }
    }
}

impl JobParams {
    /// Create new params with circuits
    pub fn new(circuits: Vec<String>) -> Self {
        Self {
            circuits,
            ..Default::default()
        }
    }

    /// Set number of shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = Some(shots);
        self
    }
}

/// Job response
#[derive(Debug, Clone, Deserialize)]
pub struct JobResponse {
    /// Job ID
    pub id: String,

    /// Backend
    pub backend: Option<String>,

    /// Status (may be absent right after submission)
    #[serde(default)]
    pub status: Option<JobStatus>,

    /// State (newer API alternative to status)
    pub state: Option<JobState>,

    /// Creation time
    pub created: Option<DateTime<Utc>>,

    /// Tags attached at submission
    #[serde(default)]
    pub tags: Vec<String>,

    /// Position in the provider queue
    #[serde(default)]
    pub queue_position: Option<u64>,

    /// Error message
    pub error: Option<JobErrorInfo>,
}

/// Job state
#[derive(Debug, Clone, Deserialize)]
pub struct JobState {
    /// Status string
    pub status: Option<String>,
    /// Reason
    pub reason: Option<String>,
}

impl JobResponse {
    /// Get effective job status
    pub fn effective_status(&self) -> JobStatus {
        if let Some(status) = self.status {
            return status;
        }

        if let Some(status) = self.state.as_ref().and_then(|s| s.status.as_deref()) {
            return JobStatus::from_label(status);
        }

        // Just submitted
        JobStatus::Queued
    }

    /// Failure reason reported by the provider
    pub fn failure_reason(&self) -> Option<String> {
        self.error
            .as_ref()
            .and_then(|e| e.message.clone())
            .or_else(|| self.state.as_ref().and_then(|s| s.reason.clone()))
    }
}

/// Job error information
#[derive(Debug, Clone, Deserialize)]
pub struct JobErrorInfo {
    /// Error message
    pub message: Option<String>,

    /// Error code
    pub code: Option<i32>,
}

/// Job result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobResult {
    /// Job ID
    pub job_id: Option<String>,

    /// Results per circuit
    pub results: Vec<CircuitResult>,

    /// Metadata
    pub metadata: Option<JobMetadata>,
}

impl JobResult {
    /// Counts of the first circuit, if present
    pub fn first_counts(&self) -> Option<&Counts> {
        self.results.first().and_then(|r| r.counts.as_ref())
    }
}

/// Single circuit result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitResult {
    /// Measurement counts
    pub counts: Option<Counts>,

    /// Success flag
    #[serde(default)]
    pub success: bool,

    /// Number of shots
    pub shots: Option<u64>,

    /// Execution time in seconds
    pub time_taken: Option<f64>,
}

/// Job metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Total execution time in seconds
    pub time_taken: Option<f64>,

    /// Number of circuits
    pub num_circuits: Option<usize>,
}

// ============================================================================
// Job Handle
// ============================================================================

/// Remote job handle
/// Gantree: HardwareJob // 원격 작업
pub struct HardwareJob {
    id: String,
    client: ProviderClient,
    status: JobStatus,
    backend: String,
    created: Option<DateTime<Utc>>,
    tags: Vec<String>,
    queue_position: Option<u64>,
    failure_reason: Option<String>,
}

impl HardwareJob {
    pub(crate) fn new(response: JobResponse, client: ProviderClient) -> Self {
        let mut job = Self {
            id: response.id.clone(),
            client,
            status: JobStatus::Queued,
            backend: String::new(),
            created: None,
            tags: Vec::new(),
            queue_position: None,
            failure_reason: None,
        };
        job.update(response);
        job
    }

    /// Fold a status response into the handle; fields the provider left out
    /// keep their previous values
    fn update(&mut self, response: JobResponse) {
        self.status = response.effective_status();
        self.failure_reason = match self.status {
            JobStatus::Failed => response.failure_reason(),
            _ => None,
        };
        self.queue_position = response.queue_position;

        if let Some(backend) = response.backend.filter(|b| !b.is_empty()) {
            self.backend = backend;
        }
        if !response.tags.is_empty() {
            self.tags = response.tags;
        }
        if response.created.is_some() {
            self.created = response.created;
        }
    }

    /// Get job ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get backend name
    pub fn backend(&self) -> &str {
        &self.backend
    }

    /// Get current status
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// Creation time, if reported
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    /// Tags attached at submission
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Position in the provider queue, while queued
    pub fn queue_position(&self) -> Option<u64> {
        self.queue_position
    }

    /// Provider-reported reason, once the job has failed
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Fetch the current status
    ///
    /// A failed job is a status here, not an error; see [`wait`](Self::wait).
    pub async fn refresh(&mut self) -> Result<JobStatus, JobError> {
        let path = format!("/jobs/{}", self.id);
        let response: JobResponse = self.client.get_with_retry(&path, 3).await?;
        self.update(response);

        match self.status {
            JobStatus::Failed => log::warn!(
                "Job {} failed: {}",
                self.id,
                self.failure_reason().unwrap_or("no reason given")
            ),
            status => log::debug!("Job {} status: {:?}", self.id, status),
        }
        Ok(self.status)
    }

    /// Poll until the job completes; failure and cancellation are errors
    pub async fn wait(&mut self, timeout: Duration) -> Result<JobStatus, JobError> {
        let start = Instant::now();
        let poll_interval = Duration::from_secs(hardware::POLL_INTERVAL_S);

        loop {
            let status = self.refresh().await?;

            match status {
                JobStatus::Completed => return Ok(status),
                JobStatus::Failed => {
                    return Err(JobError::ExecutionFailed(
                        self.failure_reason
                            .clone()
                            .unwrap_or_else(|| "Job failed".to_string()),
                    ))
                }
                JobStatus::Cancelled => return Err(JobError::Cancelled),
                _ => {}
            }

            if start.elapsed() > timeout {
                log::warn!("Job {} still {:?} after {:?}", self.id, status, timeout);
                return Err(JobError::Timeout(timeout.as_secs()));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }

    /// Get job results
    pub async fn result(&self) -> Result<JobResult, JobError> {
        if !self.status.is_success() {
            return Err(JobError::ResultsNotReady);
        }

        let path = format!("/jobs/{}/results", self.id);
        let result: JobResult = self.client.get_with_retry(&path, 3).await?;
        Ok(result)
    }
}

/// Job manager for submitting and tracking jobs
pub struct JobManager {
    client: ProviderClient,
}

impl JobManager {
    /// Create new job manager
    pub fn new(client: ProviderClient) -> Self {
        Self { client }
    }

    /// Submit a job
    pub async fn submit(&self, submission: JobSubmission) -> Result<HardwareJob, JobError> {
        let response: JobResponse = self.client.post_with_retry("/jobs", &submission, 3).await?;

        if response.effective_status() == JobStatus::Failed {
            return Err(JobError::SubmissionFailed(
                response
                    .failure_reason()
                    .unwrap_or_else(|| "Unknown error".to_string()),
            ));
        }

        log::info!(
            "Submitted job {} to {}",
            response.id,
            response.backend.as_deref().unwrap_or(&submission.backend)
        );

        let mut job = HardwareJob::new(response, self.client.clone());
        if job.backend.is_empty() {
            job.backend = submission.backend;
        }
        if job.tags.is_empty() {
            job.tags = submission.tags;
        }
        Ok(job)
    }

    /// Get existing job by ID
    pub async fn get_job(&self, job_id: &str) -> Result<HardwareJob, JobError> {
        let path = format!("/jobs/{}", job_id);
        let response: JobResponse = self.client.get(&path).await.map_err(|e| {
            if is_not_found(&e) {
                ClientError::JobNotFound(job_id.to_string())
            } else {
                e
            }
        })?;
        Ok(HardwareJob::new(response, self.client.clone()))
    }
}
