//! # Grover Hardware
//!
//! Optional provider integration: runs the 2-qubit Grover search on a remote
//! quantum backend through a runtime-style REST API.
//!
//! ## Gantree Architecture
//!
//! ```text
//! grover_hardware // L5: Hardware Provider (완료)
//!     Client // REST 클라이언트 (완료)
//!         ProviderCredentials // 자격 증명 (완료)
//!         ProviderClient // GET/POST + 재시도 (완료)
//!         least_busy // 백엔드 선택 (완료)
//!     Job // 작업 관리 (완료)
//!         JobManager // 제출/조회 (완료)
//!         HardwareJob // 상태 폴링/결과 (완료)
//!     Request // 그로버 요청 (완료)
//!         HardwareGroverRequest // 검증 + 회로 (완료)
//!         HardwareJobReport // 결과 보고 (완료)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use grover_hardware::prelude::*;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ProviderClient::new(ProviderCredentials::new("my-token"))?;
//! let backend = client.least_busy(2).await?;
//!
//! let request = HardwareGroverRequest::new("10", Some(1024))?;
//! let manager = JobManager::new(client);
//! let mut job = manager.submit_grover(&backend.backend_name, &request).await?;
//!
//! job.wait(Duration::from_secs(600)).await?;
//! let report = job.report().await?;
//! if let Some(results) = report.results {
//!     println!("success rate: {:.1}%", results.success_rate);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// REST client (Gantree: L5_Hardware → Client)
pub mod client;

/// Job management (Gantree: L5_Hardware → Job)
pub mod job;

/// Grover requests and reports (Gantree: L5_Hardware → Request)
pub mod request;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::{
    parse_backends, select_least_busy, BackendConfig, BackendInfo, BackendStatus, ClientError,
    ConnectionInfo, ProviderClient, ProviderCredentials, DEFAULT_BASE_URL,
};
pub use job::{
    CircuitResult, HardwareJob, JobError, JobManager, JobParams, JobResponse, JobResult,
    JobStatus, JobSubmission,
};
pub use request::{
    normalize_counts, target_from_tags, HardwareGroverRequest, HardwareJobReport,
    HardwareResults,
};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use grover_hardware::prelude::*;
    //! ```

    pub use crate::client::{ClientError, ConnectionInfo, ProviderClient, ProviderCredentials};
    pub use crate::job::{HardwareJob, JobError, JobManager, JobStatus};
    pub use crate::request::{HardwareGroverRequest, HardwareJobReport, HardwareResults};
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
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_submission_round_trip_through_report() {
        let request = HardwareGroverRequest::new("10", Some(1000)).unwrap();
        let submission = request.to_submission("ibm_fez");

        // provider echoes tags back with the job
        let response: JobResponse = serde_json::from_value(serde_json::json!({
            "id": "job-42",
            "backend": "ibm_fez",
            "state": {"status": "Completed"},
            "tags": submission.tags,
        }))
        .unwrap();
        assert!(response.effective_status().is_success());

        let result: JobResult = serde_json::from_str(
            r#"{"results": [{"counts": {"0x2": 960, "0x0": 15, "0x1": 12, "0x3": 13}, "success": true}]}"#,
        )
        .unwrap();

        let target = target_from_tags(&response.tags);
        let results = HardwareResults::from_job_result(target.as_deref(), &result).unwrap();

        assert_eq!(results.target_state.as_deref(), Some("10"));
        assert_eq!(results.total_shots, 1000);
        assert_eq!(results.counts.get("10"), Some(&960));
        assert_relative_eq!(results.success_rate, 96.0);
    }

    #[test]
    fn test_backend_selection_from_listing() {
        let body = r#"{"devices": [
            {"name": "ibm_sim", "qubits": 32, "queue_length": 0,
             "status": {"name": "online"}, "clops": {"type": "simulator"}},
            {"name": "ibm_torino", "qubits": 133, "queue_length": 12,
             "status": {"name": "online"}, "clops": {"type": "hardware"}},
            {"name": "ibm_fez", "qubits": 156, "queue_length": 4,
             "status": {"name": "online"}, "clops": {"type": "hardware"}},
            {"name": "ibm_down", "qubits": 156, "queue_length": 0,
             "status": {"name": "offline"}, "clops": {"type": "hardware"}}
        ]}"#;

        let backends = parse_backends(body).unwrap();
        let chosen = select_least_busy(&backends, 2).unwrap();
        let info = ConnectionInfo::new(chosen, None);

        assert_eq!(info.backend_name, "ibm_fez");
        assert_eq!(info.num_qubits, 156);
        assert_eq!(info.pending_jobs, 4);
        assert!(info.operational);
    }

    #[test]
    fn test_client_construction() {
        let client =
            ProviderClient::new(ProviderCredentials::new("token").with_base_url("http://localhost:1"))
                .unwrap();
        assert_eq!(client.base_url(), "http://localhost:1");

        assert!(matches!(
            ProviderClient::new(ProviderCredentials::new("")),
            Err(ClientError::Auth(_))
        ));
    }
}
