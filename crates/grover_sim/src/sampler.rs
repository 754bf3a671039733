//! Measurement sampler
//!
//! Gantree: L3_Measure → MeasurementSampler
//!
//! Independent categorical draws from a final distribution. Each sampler
//! owns its generator, so concurrent runs never share random state.

use grover_core::constants::{numeric, qubits};
use grover_core::{basis_label, Counts, GroverError, GroverResult};
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Shot sampler with a per-instance generator
/// Gantree: MeasurementSampler // 측정 샘플러
pub struct MeasurementSampler {
    rng: ChaCha8Rng,
    seed: Option<u64>,
}

impl Default for MeasurementSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl MeasurementSampler {
    /// Sampler seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// Reproducible sampler
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Seed, if one was given
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Check that `distribution` is a probability vector over `num_qubits`
    pub fn validate_distribution(distribution: &[f64], num_qubits: usize) -> GroverResult<()> {
        if num_qubits == 0 || num_qubits > qubits::HARD_MAX_QUBITS {
            return Err(GroverError::StateSizeOutOfRange {
                qubits: num_qubits,
                max: qubits::HARD_MAX_QUBITS,
            });
        }

        let expected = qubits::search_space(num_qubits);
        if distribution.len() != expected {
            return Err(GroverError::InvalidDistribution(format!(
                "expected {} entries, got {}",
                expected,
                distribution.len()
            )));
        }

        if let Some((i, p)) = distribution
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(GroverError::InvalidDistribution(format!(
                "entry {} is {}",
                i, p
            )));
        }

        let total: f64 = distribution.iter().sum();
        if (total - 1.0).abs() > numeric::DISTRIBUTION_TOLERANCE {
            return Err(GroverError::InvalidDistribution(format!(
                "total probability {} is not 1",
                total
            )));
        }

        Ok(())
    }

    /// Draw `shots` outcomes; only observed outcomes appear in the counts
    /// Gantree: sample(dist, n, shots) -> Counts // 샘플링
    pub fn sample(
        &mut self,
        distribution: &[f64],
        num_qubits: usize,
        shots: u64,
    ) -> GroverResult<Counts> {
        Self::validate_distribution(distribution, num_qubits)?;

        let dist = WeightedIndex::new(distribution)
            .map_err(|e| GroverError::InvalidDistribution(e.to_string()))?;

        let mut tally = vec![0u64; distribution.len()];
        for _ in 0..shots {
            tally[dist.sample(&mut self.rng)] += 1;
        }

        Ok(tally
            .into_iter()
            .enumerate()
            .filter(|(_, count)| *count > 0)
            .map(|(i, count)| (basis_label(i, num_qubits), count))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_sum_to_shots() {
        let mut sampler = MeasurementSampler::with_seed(7);
        let dist = vec![0.25; 4];
        let counts = sampler.sample(&dist, 2, 1234).unwrap();
        assert_eq!(counts.values().sum::<u64>(), 1234);
    }

    #[test]
    fn test_zero_probability_never_drawn() {
        let mut sampler = MeasurementSampler::with_seed(1);
        let counts = sampler.sample(&[0.0, 1.0], 1, 500).unwrap();
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("1"), Some(&500));
    }

    #[test]
    fn test_seed_reproducibility() {
        let dist = vec![0.1, 0.2, 0.3, 0.4];
        let a = MeasurementSampler::with_seed(42).sample(&dist, 2, 1000).unwrap();
        let b = MeasurementSampler::with_seed(42).sample(&dist, 2, 1000).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_frequencies_converge() {
        let dist = vec![0.1, 0.2, 0.3, 0.4];
        let shots = 100_000;
        let counts = MeasurementSampler::with_seed(3).sample(&dist, 2, shots).unwrap();

        for (i, p) in dist.iter().enumerate() {
            let freq = counts.get(&basis_label(i, 2)).copied().unwrap_or(0) as f64 / shots as f64;
            assert!((freq - p).abs() < 0.01, "index {}: {} vs {}", i, freq, p);
        }
    }

    #[test]
    fn test_invalid_distributions() {
        let check = |d: &[f64], n| MeasurementSampler::validate_distribution(d, n);

        assert!(matches!(
            check(&[0.5, 0.5, 0.0], 2),
            Err(GroverError::InvalidDistribution(_))
        ));
        assert!(matches!(
            check(&[1.5, -0.5], 1),
            Err(GroverError::InvalidDistribution(_))
        ));
        assert!(matches!(
            check(&[f64::NAN, 1.0], 1),
            Err(GroverError::InvalidDistribution(_))
        ));
        assert!(matches!(
            check(&[0.3, 0.3], 1),
            Err(GroverError::InvalidDistribution(_))
        ));
        assert!(check(&[0.5, 0.5 + 1e-9], 1).is_ok());
    }
}
