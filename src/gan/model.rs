//! Collaborator traits between the trainer and the networks
//!
//! The trainer only sees these traits. A forward pass returns a value that
//! owns its activation tape when recorded `with_gradient`; `backward`
//! consumes that tape and rejects passes recorded without one.

use std::path::Path;

use ndarray::Array2;

use crate::io::{load_state_dict, ModelMetadata, StateDict};
use crate::nn::Param;
use crate::{Error, Result};

/// Anything with named trainable parameters
pub trait Model {
    /// Name stored in state dict metadata
    fn name(&self) -> &str;

    /// Human-readable architecture description
    fn architecture(&self) -> String;

    fn parameters(&self) -> Vec<&Param>;

    fn parameters_mut(&mut self) -> Vec<&mut Param>;

    /// Freeze or unfreeze every parameter
    fn set_requires_grad(&mut self, requires_grad: bool) {
        for param in self.parameters_mut() {
            param.set_requires_grad(requires_grad);
        }
    }

    fn zero_grad(&mut self) {
        for param in self.parameters_mut() {
            param.zero_grad();
        }
    }

    fn num_parameters(&self) -> usize {
        self.parameters().iter().map(|p| p.len()).sum()
    }

    fn state_dict(&self) -> StateDict {
        let metadata = ModelMetadata::new(self.name(), self.architecture());
        StateDict::from_params(metadata, &self.parameters())
    }

    fn load_state_dict(&mut self, state: &StateDict) -> Result<()> {
        state.apply_to(&mut self.parameters_mut())
    }

    /// Load weights previously written with `save_state_dict`
    fn load_state(&mut self, path: &Path) -> Result<()> {
        let state = load_state_dict(path)?;
        self.load_state_dict(&state)
    }
}

/// Output of a forward pass plus its optional tape
#[derive(Debug, Clone)]
pub struct Forward<T> {
    output: Array2<f32>,
    tape: Option<T>,
}

impl<T> Forward<T> {
    pub fn new(output: Array2<f32>, tape: Option<T>) -> Self {
        Self { output, tape }
    }

    pub fn output(&self) -> &Array2<f32> {
        &self.output
    }

    pub fn into_output(self) -> Array2<f32> {
        self.output
    }

    pub fn has_tape(&self) -> bool {
        self.tape.is_some()
    }

    /// Tape of a pass recorded with gradient
    pub fn tape(&self) -> Result<&T> {
        self.tape.as_ref().ok_or_else(|| {
            Error::Gradient("backward on a forward pass recorded without gradient".to_string())
        })
    }
}

/// Mean critic score over a batch plus its optional tape
#[derive(Debug, Clone)]
pub struct CriticForward<T> {
    score: f32,
    batch: usize,
    tape: Option<T>,
}

impl<T> CriticForward<T> {
    pub fn new(score: f32, batch: usize, tape: Option<T>) -> Self {
        Self { score, batch, tape }
    }

    /// Mean score over the batch
    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn batch(&self) -> usize {
        self.batch
    }

    pub fn has_tape(&self) -> bool {
        self.tape.is_some()
    }

    pub fn tape(&self) -> Result<&T> {
        self.tape.as_ref().ok_or_else(|| {
            Error::Gradient("backward on a critic pass recorded without gradient".to_string())
        })
    }
}

/// Maps latent batches to synthetic examples
pub trait Generator: Model {
    type Tape;

    fn latent_size(&self) -> usize;

    /// Width of one generated example
    fn output_size(&self) -> usize;

    /// `z` is `(batch, latent_size)`; the output is `(batch, output_size)`
    fn forward(&self, z: &Array2<f32>, with_gradient: bool) -> Forward<Self::Tape>;

    /// Accumulate parameter gradients for `d loss / d output`
    fn backward(&mut self, pass: &Forward<Self::Tape>, grad_output: &Array2<f32>) -> Result<()>;
}

/// Scores batches of examples
pub trait Critic: Model {
    type Tape;

    fn input_size(&self) -> usize;

    /// Mean score of the `(batch, input_size)` input
    fn forward(&self, x: &Array2<f32>, with_gradient: bool) -> CriticForward<Self::Tape>;

    /// Backpropagate `seed * d score / d ...`
    ///
    /// Parameter gradients accumulate unless the critic is frozen; the
    /// gradient with respect to the input is always returned.
    fn backward(&mut self, pass: &CriticForward<Self::Tape>, seed: f32) -> Result<Array2<f32>>;
}
