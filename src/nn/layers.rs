//! Layers with hand-written backward passes
//!
//! Each layer exposes a pure `forward` and a `backward` that accumulates
//! parameter gradients and returns the gradient with respect to its input.
//! Batches are row-major: one sample per row.

use ndarray::{Array1, Array2, Axis, Zip};

use super::param::Param;

/// Declared role of a layer, used to pick its initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    /// Weight matrix plus bias (the learned projections)
    Linear,
    /// Learned scale and shift following a normalization
    Normalization,
    /// Anything else; left untouched by the initializer
    Other,
}

/// Common view over layers for initialization
pub trait Layer {
    /// Declared kind of this layer
    fn kind(&self) -> LayerKind;

    /// Primary parameter (weight or scale)
    fn weight_mut(&mut self) -> Option<&mut Param>;

    /// Secondary parameter (bias or shift)
    fn bias_mut(&mut self) -> Option<&mut Param> {
        None
    }
}

/// Fully connected layer: `y = x W^T + b`
#[derive(Debug, Clone)]
pub struct Dense {
    weight: Param,
    bias: Param,
}

impl Dense {
    /// Create a zero-initialized layer; run `nn::init` afterwards
    pub fn new(name: &str, in_features: usize, out_features: usize) -> Self {
        Self {
            weight: Param::zeros(format!("{name}.weight"), out_features, in_features),
            bias: Param::zeros(format!("{name}.bias"), 1, out_features),
        }
    }

    pub fn in_features(&self) -> usize {
        self.weight.shape().1
    }

    pub fn out_features(&self) -> usize {
        self.weight.shape().0
    }

    pub fn forward(&self, x: &Array2<f32>) -> Array2<f32> {
        x.dot(&self.weight.data().t()) + self.bias.data()
    }

    /// Accumulate `dW`, `db` and return `dx`
    pub fn backward(&mut self, x: &Array2<f32>, dy: &Array2<f32>) -> Array2<f32> {
        if self.weight.requires_grad() {
            self.weight.accumulate_grad(&dy.t().dot(x));
        }
        if self.bias.requires_grad() {
            self.bias
                .accumulate_grad(&dy.sum_axis(Axis(0)).insert_axis(Axis(0)));
        }
        dy.dot(self.weight.data())
    }

    pub fn params(&self) -> Vec<&Param> {
        vec![&self.weight, &self.bias]
    }

    pub fn params_mut(&mut self) -> Vec<&mut Param> {
        vec![&mut self.weight, &mut self.bias]
    }
}

impl Layer for Dense {
    fn kind(&self) -> LayerKind {
        LayerKind::Linear
    }

    fn weight_mut(&mut self) -> Option<&mut Param> {
        Some(&mut self.weight)
    }

    fn bias_mut(&mut self) -> Option<&mut Param> {
        Some(&mut self.bias)
    }
}

/// Per-sample normalization over the feature axis with learned scale/shift
#[derive(Debug, Clone)]
pub struct LayerNorm {
    scale: Param,
    shift: Param,
    eps: f32,
}

/// Values saved by `LayerNorm::forward` for its backward pass
#[derive(Debug, Clone)]
pub struct NormCache {
    normalized: Array2<f32>,
    inv_std: Array1<f32>,
}

impl LayerNorm {
    pub fn new(name: &str, features: usize) -> Self {
        Self {
            scale: Param::new(format!("{name}.scale"), Array2::ones((1, features))),
            shift: Param::zeros(format!("{name}.shift"), 1, features),
            eps: 1e-5,
        }
    }

    pub fn forward(&self, x: &Array2<f32>) -> (Array2<f32>, NormCache) {
        let n = x.ncols() as f32;
        let mean = x.sum_axis(Axis(1)) / n;
        let centered = x - &mean.insert_axis(Axis(1));
        let var = centered.mapv(|v| v * v).sum_axis(Axis(1)) / n;
        let inv_std = var.mapv(|v| 1.0 / (v + self.eps).sqrt());
        let normalized = &centered * &inv_std.view().insert_axis(Axis(1));
        let y = &normalized * self.scale.data() + self.shift.data();
        (y, NormCache { normalized, inv_std })
    }

    pub fn backward(&mut self, cache: &NormCache, dy: &Array2<f32>) -> Array2<f32> {
        let n = dy.ncols() as f32;
        if self.scale.requires_grad() {
            let dscale = (dy * &cache.normalized).sum_axis(Axis(0)).insert_axis(Axis(0));
            self.scale.accumulate_grad(&dscale);
        }
        if self.shift.requires_grad() {
            self.shift
                .accumulate_grad(&dy.sum_axis(Axis(0)).insert_axis(Axis(0)));
        }

        // dx = inv_std / n * (n * dxhat - sum(dxhat) - xhat * sum(dxhat * xhat))
        let dxhat = dy * self.scale.data();
        let sum_dxhat = dxhat.sum_axis(Axis(1)).insert_axis(Axis(1));
        let sum_dxhat_xhat = (&dxhat * &cache.normalized)
            .sum_axis(Axis(1))
            .insert_axis(Axis(1));
        let inv_std = cache.inv_std.view().insert_axis(Axis(1));
        (&dxhat * n - &sum_dxhat - &(&cache.normalized * &sum_dxhat_xhat)) * &inv_std / n
    }

    pub fn params(&self) -> Vec<&Param> {
        vec![&self.scale, &self.shift]
    }

    pub fn params_mut(&mut self) -> Vec<&mut Param> {
        vec![&mut self.scale, &mut self.shift]
    }
}

impl Layer for LayerNorm {
    fn kind(&self) -> LayerKind {
        LayerKind::Normalization
    }

    fn weight_mut(&mut self) -> Option<&mut Param> {
        Some(&mut self.scale)
    }

    fn bias_mut(&mut self) -> Option<&mut Param> {
        Some(&mut self.shift)
    }
}

/// Element-wise activation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activation {
    Relu,
    /// Leaky ReLU with the given negative slope
    LeakyRelu(f32),
}

impl Activation {
    fn negative_slope(self) -> f32 {
        match self {
            Activation::Relu => 0.0,
            Activation::LeakyRelu(slope) => slope,
        }
    }

    pub fn forward(self, x: &Array2<f32>) -> Array2<f32> {
        let slope = self.negative_slope();
        x.mapv(|v| if v > 0.0 { v } else { slope * v })
    }

    /// Gradient through the activation given its pre-activation input
    pub fn backward(self, pre: &Array2<f32>, dy: &Array2<f32>) -> Array2<f32> {
        let slope = self.negative_slope();
        let mut dx = dy.clone();
        Zip::from(&mut dx).and(pre).for_each(|d, &p| {
            if p <= 0.0 {
                *d *= slope;
            }
        });
        dx
    }
}

/// Softmax across channel planes, independently for every cell
///
/// A row holds `channels` planes of equal length laid out one after
/// another (`[channel][cell]`); each cell gets a distribution over channels.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSoftmax {
    channels: usize,
}

impl ChannelSoftmax {
    pub fn new(channels: usize) -> Self {
        Self {
            channels: channels.max(1),
        }
    }

    pub fn forward(&self, logits: &Array2<f32>) -> Array2<f32> {
        let cells = logits.ncols() / self.channels;
        let mut out = logits.clone();
        for mut row in out.rows_mut() {
            for cell in 0..cells {
                let max = (0..self.channels)
                    .map(|c| row[c * cells + cell])
                    .fold(f32::NEG_INFINITY, f32::max);
                let mut sum = 0.0;
                for c in 0..self.channels {
                    let e = (row[c * cells + cell] - max).exp();
                    row[c * cells + cell] = e;
                    sum += e;
                }
                for c in 0..self.channels {
                    row[c * cells + cell] /= sum;
                }
            }
        }
        out
    }

    /// `dx_c = y_c * (dy_c - sum_k y_k dy_k)` per cell
    pub fn backward(&self, probs: &Array2<f32>, dy: &Array2<f32>) -> Array2<f32> {
        let cells = probs.ncols() / self.channels;
        let mut dx = Array2::zeros(probs.raw_dim());
        for ((y, g), mut d) in probs.rows().into_iter().zip(dy.rows()).zip(dx.rows_mut()) {
            for cell in 0..cells {
                let dot: f32 = (0..self.channels)
                    .map(|c| y[c * cells + cell] * g[c * cells + cell])
                    .sum();
                for c in 0..self.channels {
                    let i = c * cells + cell;
                    d[i] = y[i] * (g[i] - dot);
                }
            }
        }
        dx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn dense_with(weight: Array2<f32>, bias: Array2<f32>) -> Dense {
        let (out, inp) = weight.dim();
        let mut layer = Dense::new("fc", inp, out);
        assert!(layer.weight.assign(weight));
        assert!(layer.bias.assign(bias));
        layer
    }

    #[test]
    fn test_dense_forward() {
        let layer = dense_with(array![[1.0, 2.0], [0.0, -1.0]], array![[0.5, 0.0]]);
        let y = layer.forward(&array![[1.0, 1.0], [2.0, 0.0]]);
        assert_eq!(y, array![[3.5, -1.0], [2.5, 0.0]]);
    }

    #[test]
    fn test_dense_backward_gradients() {
        let mut layer = dense_with(array![[1.0, 2.0]], array![[0.0]]);
        let x = array![[3.0, 4.0], [1.0, -1.0]];
        let dy = array![[1.0], [2.0]];
        let dx = layer.backward(&x, &dy);

        assert_eq!(dx, array![[1.0, 2.0], [2.0, 4.0]]);
        assert_eq!(layer.weight.grad(), &array![[5.0, 2.0]]);
        assert_eq!(layer.bias.grad(), &array![[3.0]]);
    }

    #[test]
    fn test_dense_frozen_still_returns_input_gradient() {
        let mut layer = dense_with(array![[2.0]], array![[0.0]]);
        for p in layer.params_mut() {
            p.set_requires_grad(false);
        }
        let dx = layer.backward(&array![[1.0]], &array![[1.0]]);
        assert_eq!(dx, array![[2.0]]);
        assert_eq!(layer.weight.grad(), &array![[0.0]]);
    }

    #[test]
    fn test_layer_norm_output_statistics() {
        let norm = LayerNorm::new("ln", 4);
        let (y, _) = norm.forward(&array![[1.0, 2.0, 3.0, 4.0], [-2.0, 0.0, 2.0, 8.0]]);
        for row in y.rows() {
            let mean = row.sum() / 4.0;
            let var = row.mapv(|v| (v - mean) * (v - mean)).sum() / 4.0;
            assert_abs_diff_eq!(mean, 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(var, 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_layer_norm_backward_matches_finite_difference() {
        let mut norm = LayerNorm::new("ln", 3);
        assert!(norm.scale.assign(array![[1.5, -0.5, 2.0]]));
        let x = array![[0.3, -1.2, 0.8]];
        let weights = array![[1.0, 2.0, -1.0]];

        let objective = |norm: &LayerNorm, x: &Array2<f32>| -> f32 {
            let (y, _) = norm.forward(x);
            (&y * &weights).sum()
        };

        let (_, cache) = norm.forward(&x);
        let dx = norm.backward(&cache, &weights);

        let h = 1e-3;
        for i in 0..3 {
            let mut plus = x.clone();
            plus[[0, i]] += h;
            let mut minus = x.clone();
            minus[[0, i]] -= h;
            let numeric = (objective(&norm, &plus) - objective(&norm, &minus)) / (2.0 * h);
            assert_abs_diff_eq!(dx[[0, i]], numeric, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_activation_leaky_relu() {
        let act = Activation::LeakyRelu(0.2);
        let x = array![[-1.0, 2.0]];
        assert_eq!(act.forward(&x), array![[-0.2, 2.0]]);
        assert_eq!(act.backward(&x, &array![[1.0, 1.0]]), array![[0.2, 1.0]]);
    }

    #[test]
    fn test_activation_relu_blocks_negative_gradient() {
        let act = Activation::Relu;
        let x = array![[-1.0, 0.5]];
        assert_eq!(act.forward(&x), array![[0.0, 0.5]]);
        assert_eq!(act.backward(&x, &array![[3.0, 3.0]]), array![[0.0, 3.0]]);
    }

    #[test]
    fn test_channel_softmax_sums_to_one_per_cell() {
        let softmax = ChannelSoftmax::new(3);
        // 3 channels x 2 cells
        let logits = array![[1.0, -2.0, 0.5, 0.0, 3.0, 1.0]];
        let probs = softmax.forward(&logits);
        for cell in 0..2 {
            let total: f32 = (0..3).map(|c| probs[[0, c * 2 + cell]]).sum();
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_channel_softmax_backward_matches_finite_difference() {
        let softmax = ChannelSoftmax::new(2);
        let logits = array![[0.2, -0.4, 1.0, 0.3]];
        let weights = array![[1.0, -2.0, 0.5, 3.0]];

        let probs = softmax.forward(&logits);
        let dx = softmax.backward(&probs, &weights);

        let h = 1e-3;
        for i in 0..4 {
            let mut plus = logits.clone();
            plus[[0, i]] += h;
            let mut minus = logits.clone();
            minus[[0, i]] -= h;
            let numeric = ((&softmax.forward(&plus) * &weights).sum()
                - (&softmax.forward(&minus) * &weights).sum())
                / (2.0 * h);
            assert_abs_diff_eq!(dx[[0, i]], numeric, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_layer_kinds() {
        assert_eq!(Dense::new("fc", 1, 1).kind(), LayerKind::Linear);
        assert_eq!(LayerNorm::new("ln", 1).kind(), LayerKind::Normalization);
    }
}
