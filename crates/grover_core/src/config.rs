//! Engine configuration
//!
//! Gantree: L0_Foundation → EngineConfig
//!
//! Immutable bounds shared by every simulation run. Loaded from defaults,
//! builder methods, or environment variables.

use crate::constants::{qubits, shots};
use crate::error::{GroverError, GroverResult};
use crate::types::TargetSpec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Engine configuration
/// Gantree: EngineConfig // 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum target length (inclusive)
    pub min_qubits: usize,

    /// Maximum target length (inclusive)
    pub max_qubits: usize,

    /// Minimum shots per search (inclusive)
    pub min_shots: u64,

    /// Maximum shots per search (inclusive)
    pub max_shots: u64,

    /// Shots used when a request leaves them unspecified
    pub default_shots: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_qubits: qubits::MIN_QUBITS,
            max_qubits: qubits::MAX_QUBITS,
            min_shots: shots::MIN_SHOTS,
            max_shots: shots::MAX_SHOTS,
            default_shots: shots::DEFAULT_SHOTS,
        }
    }
}

impl EngineConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Load from environment, falling back to defaults
    ///
    /// Reads `MIN_QUBITS`, `MAX_QUBITS`, `MIN_SHOTS`, `MAX_SHOTS` and
    /// `DEFAULT_SHOTS`. A variable that is set but unparsable is an error.
    pub fn from_env() -> GroverResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> GroverResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            min_qubits: read_var(&lookup, "MIN_QUBITS", defaults.min_qubits)?,
            max_qubits: read_var(&lookup, "MAX_QUBITS", defaults.max_qubits)?,
            min_shots: read_var(&lookup, "MIN_SHOTS", defaults.min_shots)?,
            max_shots: read_var(&lookup, "MAX_SHOTS", defaults.max_shots)?,
            default_shots: read_var(&lookup, "DEFAULT_SHOTS", defaults.default_shots)?,
        };
        config.validate()?;

        log::info!(
            "Quantum configuration: {}-{} qubits, {}-{} shots supported",
            config.min_qubits,
            config.max_qubits,
            config.min_shots,
            config.max_shots
        );
        Ok(config)
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set qubit bounds
    pub fn with_qubit_range(mut self, min: usize, max: usize) -> Self {
        self.min_qubits = min;
        self.max_qubits = max;
        self
    }

    /// Set shot bounds
    pub fn with_shot_range(mut self, min: u64, max: u64) -> Self {
        self.min_shots = min;
        self.max_shots = max;
        self
    }

    /// Set default shots
    pub fn with_default_shots(mut self, shots: u64) -> Self {
        self.default_shots = shots;
        self
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check that the bounds are usable
    pub fn validate(&self) -> GroverResult<()> {
        if self.min_qubits == 0 {
            return Err(GroverError::InvalidConfig(
                "min_qubits must be at least 1".into(),
            ));
        }
        if self.min_qubits > self.max_qubits {
            return Err(GroverError::InvalidConfig(format!(
                "min_qubits ({}) exceeds max_qubits ({})",
                self.min_qubits, self.max_qubits
            )));
        }
        if self.max_qubits > qubits::HARD_MAX_QUBITS {
            return Err(GroverError::StateSizeOutOfRange {
                qubits: self.max_qubits,
                max: qubits::HARD_MAX_QUBITS,
            });
        }
        if self.min_shots == 0 || self.min_shots > self.max_shots {
            return Err(GroverError::InvalidConfig(format!(
                "invalid shot range [{}, {}]",
                self.min_shots, self.max_shots
            )));
        }
        if !(self.min_shots..=self.max_shots).contains(&self.default_shots) {
            return Err(GroverError::InvalidConfig(format!(
                "default_shots ({}) outside [{}, {}]",
                self.default_shots, self.min_shots, self.max_shots
            )));
        }
        Ok(())
    }

    /// Validate a target bit string against the qubit bounds
    pub fn parse_target(&self, bits: &str) -> GroverResult<TargetSpec> {
        TargetSpec::new(bits, self.min_qubits, self.max_qubits)
    }

    /// Validate a shot count against the shot bounds
    pub fn check_shots(&self, shots: u64) -> GroverResult<u64> {
        if (self.min_shots..=self.max_shots).contains(&shots) {
            Ok(shots)
        } else {
            Err(GroverError::ShotsOutOfRange {
                shots,
                min: self.min_shots,
                max: self.max_shots,
            })
        }
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "EngineConfig(qubits={}-{}, shots={}-{}, default={})",
            self.min_qubits, self.max_qubits, self.min_shots, self.max_shots, self.default_shots
        )
    }
}

fn read_var<F, T>(lookup: &F, key: &str, default: T) -> GroverResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            GroverError::InvalidConfig(format!("{} must be a non-negative integer, got '{}'", key, raw))
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.min_qubits, 1);
        assert_eq!(config.max_qubits, 8);
        assert_eq!(config.min_shots, 100);
        assert_eq!(config.max_shots, 10_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config =
            EngineConfig::from_lookup(lookup_from(&[("MAX_QUBITS", "4"), ("MIN_QUBITS", "2")]))
                .unwrap();
        assert_eq!(config.min_qubits, 2);
        assert_eq!(config.max_qubits, 4);
        assert_eq!(config.default_shots, 1000);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = EngineConfig::from_lookup(lookup_from(&[("MAX_QUBITS", "eight")])).unwrap_err();
        assert!(matches!(err, GroverError::InvalidConfig(_)));
    }

    #[test]
    fn test_validate_inverted_bounds() {
        let config = EngineConfig::default().with_qubit_range(5, 3);
        assert!(config.validate().is_err());

        let config = EngineConfig::default().with_qubit_range(0, 3);
        assert!(config.validate().is_err());

        let config = EngineConfig::default().with_qubit_range(1, 40);
        assert!(matches!(
            config.validate(),
            Err(GroverError::StateSizeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_default_shots() {
        let config = EngineConfig::default().with_default_shots(50);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_check_shots() {
        let config = EngineConfig::default();
        assert_eq!(config.check_shots(100), Ok(100));
        assert_eq!(config.check_shots(10_000), Ok(10_000));
        assert!(config.check_shots(99).is_err());
        assert!(config.check_shots(10_001).is_err());
    }

    #[test]
    fn test_parse_target_uses_bounds() {
        let config = EngineConfig::default().with_qubit_range(2, 3);
        assert!(config.parse_target("1").is_err());
        assert!(config.parse_target("101").is_ok());
        assert!(config.parse_target("1010").is_err());
    }

    #[test]
    fn test_serde_roundtrip_shape() {
        let json = serde_json::to_string(&EngineConfig::default()).unwrap();
        assert!(json.contains("\"max_qubits\":8"));
    }
}
