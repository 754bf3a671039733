//! Quantum provider REST client
//!
//! Gantree: L5_Hardware → Client
//!
//! Bearer-token client for a runtime-style REST API: backend discovery,
//! least-busy selection, and the raw GET/POST plumbing used by jobs.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Default runtime API base URL
pub const DEFAULT_BASE_URL: &str = "https://quantum.cloud.ibm.com/api/v1";

/// Client errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Missing or rejected credentials
    #[error("Authentication error: {0}")]
    Auth(String),

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API error response
    #[error("API error ({code}): {message}")]
    ApiError {
        /// HTTP status code
        code: u16,
        /// Error message
        message: String,
    },

    /// JSON parsing error
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Backend not found
    #[error("Backend not found: {0}")]
    BackendNotFound(String),

    /// Job not found
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after}s")]
    RateLimited {
        /// Seconds to wait before retry
        retry_after: u64,
    },

    /// Service unavailable
    #[error("Service temporarily unavailable")]
    ServiceUnavailable,
}

// ============================================================================
// Credentials
// ============================================================================

/// Provider credentials, supplied by the caller
/// Gantree: ProviderCredentials // 자격 증명
#[derive(Clone)]
pub struct ProviderCredentials {
    token: String,
    base_url: String,
}

impl ProviderCredentials {
    /// Credentials for the default endpoint
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Read `QUANTUM_PROVIDER_TOKEN` and optional `QUANTUM_PROVIDER_URL`
    pub fn from_env() -> Result<Self, ClientError> {
        let token = std::env::var("QUANTUM_PROVIDER_TOKEN")
            .map_err(|_| ClientError::Auth("QUANTUM_PROVIDER_TOKEN is not set".to_string()))?;

        let credentials = match std::env::var("QUANTUM_PROVIDER_URL") {
            Ok(url) => Self::new(token).with_base_url(url),
            Err(_) => Self::new(token),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Reject an empty token
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.token.trim().is_empty() {
            return Err(ClientError::Auth("token is empty".to_string()));
        }
        Ok(())
    }

    /// `Authorization` header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// API base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("token", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ============================================================================
// Client
// ============================================================================

/// Provider REST client
/// Gantree: ProviderClient // REST 클라이언트
#[derive(Clone)]
pub struct ProviderClient {
    client: reqwest::Client,
    base_url: String,
}

impl ProviderClient {
    /// Create client with credentials
    pub fn new(credentials: ProviderCredentials) -> Result<Self, ClientError> {
        credentials.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&credentials.auth_header())
                .map_err(|_| ClientError::Auth("token contains invalid characters".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("grover-hardware/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            base_url: credentials.base_url().to_string(),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ProviderCredentials::from_env()?)
    }

    /// Get base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Low-level HTTP methods
    // ========================================================================

    /// GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;
        handle_response(response).await
    }

    /// POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;
        handle_response(response).await
    }

    /// GET request with retry on rate limiting or unavailability
    pub async fn get_with_retry<T: DeserializeOwned>(
        &self,
        path: &str,
        max_retries: usize,
    ) -> Result<T, ClientError> {
        let mut retries = 0;
        loop {
            match self.get(path).await {
                Ok(result) => return Ok(result),
                Err(e) => match retry_delay(&e) {
                    Some(delay) if retries < max_retries => {
                        retries += 1;
                        log::warn!("GET {} failed ({}), retry {} in {:?}", path, e, retries, delay);
                        tokio::time::sleep(delay).await;
                    }
                    _ => return Err(e),
                },
            }
        }
    }

    /// POST request with retry on rate limiting or unavailability
    pub async fn post_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        max_retries: usize,
    ) -> Result<T, ClientError> {
        let mut retries = 0;
        loop {
            match self.post(path, body).await {
                Ok(result) => return Ok(result),
                Err(e) => match retry_delay(&e) {
                    Some(delay) if retries < max_retries => {
                        retries += 1;
                        log::warn!("POST {} failed ({}), retry {} in {:?}", path, e, retries, delay);
                        tokio::time::sleep(delay).await;
                    }
                    _ => return Err(e),
                },
            }
        }
    }

    // ========================================================================
    // Backend APIs
    // ========================================================================

    /// List available backends
    pub async fn list_backends(&self) -> Result<Vec<BackendInfo>, ClientError> {
        let url = format!("{}/backends", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let retry_after = header_str(&response, "retry-after");
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(status, retry_after.as_deref(), text));
        }

        let body = response.text().await?;
        parse_backends(&body)
    }

    /// Get backend status
    pub async fn get_backend_status(&self, name: &str) -> Result<BackendStatus, ClientError> {
        let path = format!("/backends/{}/status", name);
        self.get(&path).await.map_err(|e| not_found_as(e, || ClientError::BackendNotFound(name.to_string())))
    }

    /// Get backend configuration
    pub async fn get_backend_config(&self, name: &str) -> Result<BackendConfig, ClientError> {
        let path = format!("/backends/{}/configuration", name);
        self.get(&path).await.map_err(|e| not_found_as(e, || ClientError::BackendNotFound(name.to_string())))
    }

    /// Least busy operational hardware backend with at least `min_qubits`
    /// Gantree: least_busy(min_qubits) -> ConnectionInfo // 백엔드 선택
    pub async fn least_busy(&self, min_qubits: usize) -> Result<ConnectionInfo, ClientError> {
        let backends = self.list_backends().await?;
        let backend = select_least_busy(&backends, min_qubits)
            .ok_or_else(|| {
                ClientError::BackendNotFound(format!(
                    "no operational hardware backend with >= {} qubits",
                    min_qubits
                ))
            })?
            .clone();

        let config = match self.get_backend_config(&backend.name).await {
            Ok(config) => Some(config),
            Err(e) => {
                log::warn!("Could not get configuration for {}: {}", backend.name, e);
                None
            }
        };

        let info = ConnectionInfo::new(&backend, config);
        log::info!(
            "Selected backend {} ({} qubits, {} pending jobs)",
            info.backend_name,
            info.num_qubits,
            info.pending_jobs
        );
        Ok(info)
    }
}

// ============================================================================
// Response Handling
// ============================================================================

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(ClientError::from)
    } else {
        let retry_after = header_str(&response, "retry-after");
        let text = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), retry_after.as_deref(), text))
    }
}

fn header_str(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Map a failed HTTP status to a client error
pub fn status_error(status: u16, retry_after: Option<&str>, body: String) -> ClientError {
    match status {
        401 => ClientError::Auth("Invalid or expired token".to_string()),
        429 => ClientError::RateLimited {
            retry_after: retry_after.and_then(|s| s.trim().parse().ok()).unwrap_or(60),
        },
        503 => ClientError::ServiceUnavailable,
        code => ClientError::ApiError {
            code,
            message: body,
        },
    }
}

fn not_found_as(err: ClientError, replacement: impl FnOnce() -> ClientError) -> ClientError {
    match err {
        ClientError::ApiError { code: 404, .. } => replacement(),
        other => other,
    }
}

pub(crate) fn is_not_found(err: &ClientError) -> bool {
    matches!(err, ClientError::ApiError { code: 404, .. })
}

/// Delay before retrying `err`, if it is retryable
pub fn retry_delay(err: &ClientError) -> Option<Duration> {
    match err {
        ClientError::RateLimited { retry_after } => Some(Duration::from_secs(*retry_after)),
        ClientError::ServiceUnavailable => Some(Duration::from_secs(5)),
        _ => None,
    }
}

/// Parse a backend list in any of the accepted shapes
pub fn parse_backends(body: &str) -> Result<Vec<BackendInfo>, ClientError> {
    if let Ok(response) = serde_json::from_str::<DevicesResponse>(body) {
        return Ok(response
            .devices
            .into_iter()
            .map(|d| d.to_backend_info())
            .collect());
    }

    if let Ok(response) = serde_json::from_str::<BackendsResponse>(body) {
        return Ok(response.backends);
    }

    if let Ok(backends) = serde_json::from_str::<Vec<BackendInfo>>(body) {
        return Ok(backends);
    }

    log::warn!(
        "Unexpected backends response format. First 200 chars: {}",
        body.chars().take(200).collect::<String>()
    );
    Err(ClientError::ApiError {
        code: 500,
        message: "Unknown response format from backends API".to_string(),
    })
}

/// Operational, non-simulator backend with the shortest queue
pub fn select_least_busy(backends: &[BackendInfo], min_qubits: usize) -> Option<&BackendInfo> {
    backends
        .iter()
        .filter(|b| b.operational && !b.simulator)
        .filter(|b| b.num_qubits.unwrap_or(0) >= min_qubits)
        .min_by_key(|b| b.queue_length.unwrap_or(u64::MAX))
}

// ============================================================================
// Response Types
// ============================================================================

/// Backends list response (legacy format)
#[derive(Debug, Clone, Deserialize)]
pub struct BackendsResponse {
    /// List of backends
    pub backends: Vec<BackendInfo>,
}

/// Devices list response
#[derive(Debug, Clone, Deserialize)]
pub struct DevicesResponse {
    /// List of devices
    pub devices: Vec<DeviceInfo>,
}

/// Device information
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceInfo {
    /// Backend name
    pub name: String,

    /// Number of qubits
    #[serde(default)]
    pub qubits: usize,

    /// Processor type
    pub processor_type: Option<ProcessorType>,

    /// Queue length
    #[serde(default)]
    pub queue_length: u64,

    /// Status
    pub status: Option<DeviceStatus>,

    /// CLOPS, whose type tells hardware from simulator
    pub clops: Option<ClopsInfo>,
}

/// Device status
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceStatus {
    /// Status name (e.g., "online", "offline")
    pub name: Option<String>,
    /// Status reason
    pub reason: Option<String>,
}

/// CLOPS info
#[derive(Debug, Clone, Deserialize)]
pub struct ClopsInfo {
    /// Type (hardware/simulator)
    #[serde(rename = "type")]
    pub clops_type: Option<String>,
    /// Value
    pub value: Option<u64>,
}

impl DeviceInfo {
    /// Convert to BackendInfo
    pub fn to_backend_info(&self) -> BackendInfo {
        let is_online = self
            .status
            .as_ref()
            .and_then(|s| s.name.as_deref())
            .map(|n| n == "online")
            .unwrap_or(false);

        BackendInfo {
            name: self.name.clone(),
            num_qubits: Some(self.qubits),
            simulator: self
                .clops
                .as_ref()
                .and_then(|c| c.clops_type.as_deref())
                .map(|t| t == "simulator")
                .unwrap_or(false),
            version: self
                .processor_type
                .as_ref()
                .and_then(|p| p.revision.clone()),
            processor_type: self.processor_type.clone(),
            operational: is_online,
            queue_length: Some(self.queue_length),
        }
    }
}

/// Backend information (unified)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendInfo {
    /// Backend name
    pub name: String,

    /// Number of qubits
    #[serde(rename = "n_qubits", alias = "num_qubits", alias = "qubits")]
    pub num_qubits: Option<usize>,

    /// Whether backend is simulator
    #[serde(default)]
    pub simulator: bool,

    /// Backend version
    pub version: Option<String>,

    /// Processor type
    pub processor_type: Option<ProcessorType>,

    /// Whether backend is operational
    #[serde(default)]
    pub operational: bool,

    /// Queue length
    #[serde(default, alias = "pending_jobs")]
    pub queue_length: Option<u64>,
}

/// Processor type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorType {
    /// Family (e.g., "Falcon", "Heron")
    pub family: Option<String>,

    /// Revision
    pub revision: Option<String>,
}

/// Backend status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendStatus {
    /// Backend name
    pub backend_name: Option<String>,

    /// Operational status
    #[serde(default)]
    pub operational: bool,

    /// Pending jobs
    pub pending_jobs: Option<u64>,

    /// Status message
    pub status_msg: Option<String>,
}

/// Backend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend name
    pub backend_name: Option<String>,

    /// Backend version
    pub backend_version: Option<String>,

    /// Number of qubits
    pub n_qubits: Option<usize>,

    /// Basis gates
    pub basis_gates: Option<Vec<String>>,

    /// Coupling map
    pub coupling_map: Option<Vec<Vec<usize>>>,

    /// Max shots
    pub max_shots: Option<u64>,
}

/// Summary of the selected backend
/// Gantree: ConnectionInfo // 연결 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionInfo {
    /// Backend name
    pub backend_name: String,

    /// Backend version
    pub backend_version: String,

    /// Number of qubits
    pub num_qubits: usize,

    /// Whether the backend is operational
    pub operational: bool,

    /// Jobs in queue
    pub pending_jobs: u64,

    /// Native gates
    pub basis_gates: Vec<String>,

    /// Qubit connectivity
    pub coupling_map: Vec<Vec<usize>>,
}

impl ConnectionInfo {
    /// Combine list entry and (optional) configuration
    pub fn new(backend: &BackendInfo, config: Option<BackendConfig>) -> Self {
        let config = config.unwrap_or_default();
        Self {
            backend_name: backend.name.clone(),
            backend_version: config
                .backend_version
                .or_else(|| backend.version.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            num_qubits: backend.num_qubits.or(config.n_qubits).unwrap_or(0),
            operational: backend.operational,
            pending_jobs: backend.queue_length.unwrap_or(0),
            basis_gates: config.basis_gates.unwrap_or_default(),
            coupling_map: config.coupling_map.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend(name: &str, qubits: usize, queue: u64, operational: bool, simulator: bool) -> BackendInfo {
        BackendInfo {
            name: name.to_string(),
            num_qubits: Some(qubits),
            simulator,
            version: None,
            processor_type: None,
            operational,
            queue_length: Some(queue),
        }
    }

    #[test]
    fn test_backend_info_deserialize() {
        let json = r#"{
            "name": "ibm_brisbane",
            "n_qubits": 127,
            "simulator": false,
            "version": "1.0.0"
        }"#;

        let info: BackendInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.name, "ibm_brisbane");
        assert_eq!(info.num_qubits, Some(127));
        assert!(!info.simulator);
    }

    #[test]
    fn test_parse_backends_formats() {
        let devices = r#"{"devices": [
            {"name": "ibm_fez", "qubits": 156, "queue_length": 3,
             "status": {"name": "online"}, "clops": {"type": "hardware", "value": 195000}}
        ]}"#;
        let parsed = parse_backends(devices).unwrap();
        assert_eq!(parsed[0].name, "ibm_fez");
        assert!(parsed[0].operational);
        assert!(!parsed[0].simulator);
        assert_eq!(parsed[0].queue_length, Some(3));

        let legacy = r#"{"backends": [{"name": "a", "n_qubits": 5}]}"#;
        assert_eq!(parse_backends(legacy).unwrap().len(), 1);

        let bare = r#"[{"name": "a", "qubits": 5}, {"name": "b", "num_qubits": 7}]"#;
        assert_eq!(parse_backends(bare).unwrap()[1].num_qubits, Some(7));

        assert!(parse_backends(r#"{"unexpected": true}"#).is_err());
    }

    #[test]
    fn test_select_least_busy() {
        let backends = vec![
            backend("busy", 127, 40, true, false),
            backend("idle_sim", 32, 0, true, true),
            backend("offline", 127, 0, false, false),
            backend("tiny", 1, 0, true, false),
            backend("quiet", 27, 2, true, false),
        ];

        let chosen = select_least_busy(&backends, 2).unwrap();
        assert_eq!(chosen.name, "quiet");
        assert!(select_least_busy(&backends, 200).is_none());
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(status_error(401, None, String::new()), ClientError::Auth(_)));
        assert!(matches!(
            status_error(429, Some("12"), String::new()),
            ClientError::RateLimited { retry_after: 12 }
        ));
        assert!(matches!(
            status_error(429, None, String::new()),
            ClientError::RateLimited { retry_after: 60 }
        ));
        assert!(matches!(status_error(503, None, String::new()), ClientError::ServiceUnavailable));
        assert!(matches!(
            status_error(404, None, "missing".into()),
            ClientError::ApiError { code: 404, .. }
        ));
    }

    #[test]
    fn test_retry_delay() {
        assert_eq!(
            retry_delay(&ClientError::RateLimited { retry_after: 3 }),
            Some(Duration::from_secs(3))
        );
        assert_eq!(retry_delay(&ClientError::ServiceUnavailable), Some(Duration::from_secs(5)));
        assert_eq!(retry_delay(&ClientError::JobNotFound("x".into())), None);
    }

    #[test]
    fn test_connection_info_merges_config() {
        let info = ConnectionInfo::new(
            &backend("ibm_fez", 156, 4, true, false),
            Some(BackendConfig {
                backend_version: Some("2.1.0".into()),
                basis_gates: Some(vec!["cz".into(), "sx".into()]),
                coupling_map: Some(vec![vec![0, 1]]),
                ..Default::default()
            }),
        );

        assert_eq!(info.backend_version, "2.1.0");
        assert_eq!(info.pending_jobs, 4);
        assert_eq!(info.basis_gates, vec!["cz", "sx"]);

        let bare = ConnectionInfo::new(&backend("x", 5, 0, true, false), None);
        assert_eq!(bare.backend_version, "unknown");
        assert!(bare.coupling_map.is_empty());
    }

    #[test]
    fn test_credentials() {
        let creds = ProviderCredentials::new("abc").with_base_url("https://example.test/api/");
        assert_eq!(creds.base_url(), "https://example.test/api");
        assert_eq!(creds.auth_header(), "Bearer abc");
        assert!(!format!("{:?}", creds).contains("abc"));
        assert!(ProviderCredentials::new("  ").validate().is_err());
    }
}
