//! Constants for Grover
//!
//! Gantree: L0_Foundation → Constants
//!
//! Qubit and shot bounds, numerical tolerances, and provider limits.
//! Defaults match the public service these bounds were tuned for.

// ============================================================================
// Qubit Bounds
// Gantree: qubits
// ============================================================================

pub mod qubits {
    //! Qubit-count bounds

    /// Default minimum target length
    pub const MIN_QUBITS: usize = 1;

    /// Default maximum target length
    pub const MAX_QUBITS: usize = 8;

    /// Largest state vector the simulator will allocate (2^24 amplitudes, 128 MiB)
    pub const HARD_MAX_QUBITS: usize = 24;

    /// Number of basis states for `n` qubits, saturating at `usize::MAX`
    /// once `2^n` no longer fits
    #[inline]
    pub const fn search_space(n: usize) -> usize {
        match checked_search_space(n) {
            Some(size) => size,
            None => usize::MAX,
        }
    }

    /// `2^n`, or `None` when it does not fit in a `usize`
    #[inline]
    pub const fn checked_search_space(n: usize) -> Option<usize> {
        if n < usize::BITS as usize {
            Some(1 << n)
        } else {
            None
        }
    }
}

// ============================================================================
// Shot Bounds
// Gantree: shots
// ============================================================================

pub mod shots {
    //! Measurement shot bounds

    /// Minimum shots per simulated search
    pub const MIN_SHOTS: u64 = 100;

    /// Maximum shots per simulated search
    pub const MAX_SHOTS: u64 = 10_000;

    /// Shots used when the caller does not specify any
    pub const DEFAULT_SHOTS: u64 = 1000;
}

// ============================================================================
// Numerical Tolerances
// Gantree: numeric
// ============================================================================

pub mod numeric {
    //! Floating-point tolerances

    /// Normalization tolerance for state vectors
    pub const NORM_TOLERANCE: f64 = 1e-9;

    /// Tolerance on the total mass of a distribution handed to the sampler
    pub const DISTRIBUTION_TOLERANCE: f64 = 1e-6;
}

// ============================================================================
// Provider Limits
// Gantree: hardware
// ============================================================================

pub mod hardware {
    //! Limits for remote hardware submission

    /// Remote runs always use a 2-qubit search
    pub const HARDWARE_QUBITS: usize = 2;

    /// Minimum shots per hardware job
    pub const MIN_SHOTS: u64 = 100;

    /// Maximum shots per hardware job
    pub const MAX_SHOTS: u64 = 8192;

    /// Default shots per hardware job
    pub const DEFAULT_SHOTS: u64 = 1024;

    /// Job status polling interval in seconds
    pub const POLL_INTERVAL_S: u64 = 5;
}
