//! # Grover Core
//!
//! Validated targets, configuration, errors, and the gate-level circuit model
//! for the Grover search simulator.
//!
//! ## Gantree Architecture
//!
//! ```text
//! grover_core // L0+L1: Foundation + Circuit (완료)
//!     L0_Foundation // 기반 타입/상수/에러/설정 (완료)
//!         CoreTypes // 타깃/카운트 타입 (완료)
//!         Constants // 큐비트/샷 경계 (완료)
//!         Errors // 에러 타입 (완료)
//!         EngineConfig // 환경 설정 (완료)
//!     L1_Circuit // 회로 구조 (완료)
//!         Gate // 게이트 enum (완료)
//!         Circuit // 회로 구조체 (완료)
//!         CircuitBuilder // 오라클/확산 빌더 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use grover_core::prelude::*;
//!
//! let target = TargetSpec::parse("101").unwrap();
//! let circuit = CircuitBuilder::new(target.num_qubits())
//!     .grover(&target, 2)
//!     .build();
//!
//! println!("{}", circuit);
//! println!("{}", circuit.to_qasm());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use grover_core::prelude::*;
//!
//! let config = EngineConfig::default().with_qubit_range(2, 4);
//! assert!(config.validate().is_ok());
//! assert!(config.parse_target("1").is_err());
//! assert_eq!(config.parse_target("0110").unwrap().index(), 6);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Engine configuration (Gantree: L0_Foundation → EngineConfig)
pub mod config;

/// Quantum gates (Gantree: L1_Circuit → Gate)
pub mod gate;

/// Circuit structure (Gantree: L1_Circuit → Circuit)
pub mod circuit;

/// Circuit builder (Gantree: L1_Circuit → CircuitBuilder)
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::CircuitBuilder;
pub use circuit::Circuit;
pub use config::EngineConfig;
pub use constants::{hardware, numeric, qubits, shots};
pub use error::{GroverError, GroverResult};
pub use gate::Gate;
pub use types::{basis_label, Counts, ProbabilityMap, QubitId, TargetSpec};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use grover_core::prelude::*;
    //! ```

    pub use crate::builder::CircuitBuilder;
    pub use crate::circuit::Circuit;
    pub use crate::config::EngineConfig;
    pub use crate::constants::{hardware, numeric, qubits, shots};
    pub use crate::error::{GroverError, GroverResult};
    pub use crate::gate::Gate;
    pub use crate::types::{basis_label, Counts, ProbabilityMap, QubitId, TargetSpec};
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

    #[test]
    fn test_grover_circuit_3q() {
        let target = TargetSpec::parse("101").unwrap();
        let circuit = CircuitBuilder::new(3).grover(&target, 2).try_build().unwrap();

        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_clbits(), 3);
        assert!(circuit.depth() > 2 * 5);

        // One oracle CCZ and one diffusion CCZ per round
        assert_eq!(circuit.count_ops().get("ccz"), Some(&4));
    }

    #[test]
    fn test_oracle_x_count_tracks_zero_bits() {
        for (bits, zeros) in [("1111", 0), ("1010", 2), ("0000", 4)] {
            let target = TargetSpec::parse(bits).unwrap();
            let circuit = CircuitBuilder::new(4).phase_oracle(&target).build();
            assert_eq!(
                circuit.count_ops().get("x").copied().unwrap_or(0),
                2 * zeros,
                "target {}",
                bits
            );
        }
    }

    #[test]
    fn test_config_feeds_targets() {
        let config = EngineConfig::default();
        let target = config.parse_target("10101010").unwrap();
        assert_eq!(target.index(), 170);
        assert_eq!(target.search_space(), 256);

        assert!(matches!(
            config.parse_target("101010101"),
            Err(GroverError::QubitCountOutOfRange { qubits: 9, min: 1, max: 8 })
        ));
    }

    #[test]
    fn test_qasm_contains_grover_network() {
        let target = TargetSpec::parse("01").unwrap();
        let qasm = CircuitBuilder::new(2).grover(&target, 1).build().to_qasm();

        assert!(qasm.contains("qubit[2] q;"));
        assert!(qasm.contains("cz q[0], q[1];"));
        assert!(qasm.contains("x q[1];"));
        assert!(qasm.ends_with("c = measure q;"));
    }

    #[test]
    fn test_hardware_limits() {
        assert_eq!(hardware::HARDWARE_QUBITS, 2);
        assert_eq!(hardware::MAX_SHOTS, 8192);
        assert_eq!(shots::DEFAULT_SHOTS, 1000);
    }
}
