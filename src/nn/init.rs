//! Weight initialization keyed on layer kind

use ndarray::Array2;
use rand::Rng;

use super::layers::{Layer, LayerKind};

/// Standard deviation shared by linear weights and normalization scales
pub const INIT_STD: f64 = 0.02;

/// Sample from N(mean, std) using the Box-Muller transform
pub fn sample_normal<R: Rng>(rng: &mut R, mean: f64, std: f64) -> f32 {
    let u1: f64 = rng.random::<f64>().max(1e-10);
    let u2: f64 = rng.random::<f64>();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    (mean + std * z) as f32
}

/// Matrix of N(mean, std) draws
pub fn normal_matrix<R: Rng>(rng: &mut R, rows: usize, cols: usize, mean: f64, std: f64) -> Array2<f32> {
    Array2::from_shape_simple_fn((rows, cols), || sample_normal(rng, mean, std))
}

/// Initialize one layer according to its declared kind
///
/// - `Linear`: weight ~ N(0, 0.02), bias = 0
/// - `Normalization`: scale ~ N(1, 0.02), shift = 0
/// - `Other`: untouched
pub fn init_layer<R: Rng>(layer: &mut dyn Layer, rng: &mut R) {
    let mean = match layer.kind() {
        LayerKind::Linear => 0.0,
        LayerKind::Normalization => 1.0,
        LayerKind::Other => return,
    };
    if let Some(weight) = layer.weight_mut() {
        let (rows, cols) = weight.shape();
        weight.assign(normal_matrix(rng, rows, cols, mean, INIT_STD));
    }
    if let Some(bias) = layer.bias_mut() {
        bias.data_mut().fill(0.0);
    }
}

/// Initialize every layer in order
pub fn init_weights<R: Rng>(layers: Vec<&mut dyn Layer>, rng: &mut R) {
    for layer in layers {
        init_layer(layer, rng);
    }
}
