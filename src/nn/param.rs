//! Trainable parameter with an explicit gradient buffer

use ndarray::Array2;

/// A named parameter matrix and its accumulated gradient
///
/// Gradients follow an explicit cycle: `accumulate_grad` adds into the
/// buffer, an optimizer reads it during `step`, and `zero_grad` clears it
/// before the next accumulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: String,
    data: Array2<f32>,
    grad: Array2<f32>,
    requires_grad: bool,
}

impl Param {
    /// Create a parameter from existing values
    pub fn new(name: impl Into<String>, data: Array2<f32>) -> Self {
        let grad = Array2::zeros(data.raw_dim());
        Self {
            name: name.into(),
            data,
            grad,
            requires_grad: true,
        }
    }

    /// Create a zero-filled parameter of shape `(rows, cols)`
    pub fn zeros(name: impl Into<String>, rows: usize, cols: usize) -> Self {
        Self::new(name, Array2::zeros((rows, cols)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Array2<f32> {
        &mut self.data
    }

    pub fn grad(&self) -> &Array2<f32> {
        &self.grad
    }

    pub fn requires_grad(&self) -> bool {
        self.requires_grad
    }

    /// Mark the parameter trainable or frozen
    ///
    /// Frozen parameters ignore `accumulate_grad` and are skipped by
    /// optimizers; their values stay readable.
    pub fn set_requires_grad(&mut self, requires_grad: bool) {
        self.requires_grad = requires_grad;
    }

    /// Add `grad` into the gradient buffer (no-op when frozen)
    pub fn accumulate_grad(&mut self, grad: &Array2<f32>) {
        if self.requires_grad {
            self.grad.scaled_add(1.0, grad);
        }
    }

    /// Clear the gradient buffer
    pub fn zero_grad(&mut self) {
        self.grad.fill(0.0);
    }

    /// Replace the values, keeping the shape
    ///
    /// Returns `false` and leaves the parameter untouched on shape mismatch.
    pub fn assign(&mut self, data: Array2<f32>) -> bool {
        if data.dim() != self.data.dim() {
            return false;
        }
        self.data = data;
        true
    }
}
