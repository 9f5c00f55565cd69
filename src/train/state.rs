//! Mutable state threaded through a training run

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::gan::sample_latent;

/// Counters, randomness and the fixed visualization noise
///
/// Counters start at zero and only move forward; `generator_iteration`
/// carries across epochs.
#[derive(Debug, Clone)]
pub struct TrainingState {
    pub epoch: usize,
    pub batch_index: usize,
    pub generator_iteration: usize,
    pub rng: StdRng,
    fixed_noise: Array2<f32>,
}

impl TrainingState {
    /// Seed the RNG, then draw the fixed noise batch from it
    pub fn new(seed: u64, noise_rows: usize, latent_size: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let fixed_noise = sample_latent(&mut rng, noise_rows, latent_size);
        Self {
            epoch: 0,
            batch_index: 0,
            generator_iteration: 0,
            rng,
            fixed_noise,
        }
    }

    /// Noise sampled once at start-up and never resampled
    pub fn fixed_noise(&self) -> &Array2<f32> {
        &self.fixed_noise
    }

    /// Fresh latent batch from the run's RNG
    pub fn sample_noise(&mut self, rows: usize, latent_size: usize) -> Array2<f32> {
        sample_latent(&mut self.rng, rows, latent_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let state = TrainingState::new(1, 4, 10);
        assert_eq!(
            (state.epoch, state.batch_index, state.generator_iteration),
            (0, 0, 0)
        );
        assert_eq!(state.fixed_noise().dim(), (4, 10));
    }

    #[test]
    fn test_fixed_noise_survives_sampling() {
        let mut state = TrainingState::new(1, 4, 10);
        let before = state.fixed_noise().clone();
        let fresh = state.sample_noise(4, 10);
        assert_ne!(fresh, before);
        assert_eq!(state.fixed_noise(), &before);
    }
}
