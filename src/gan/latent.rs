//! Latent noise sampling

use ndarray::Array2;
use rand::Rng;

use crate::nn::init::normal_matrix;

/// Batch of `rows` latent vectors drawn from N(0, 1)
pub fn sample_latent<R: Rng>(rng: &mut R, rows: usize, latent_size: usize) -> Array2<f32> {
    normal_matrix(rng, rows, latent_size, 0.0, 1.0)
}
