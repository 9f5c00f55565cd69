//! In-memory dataset with a per-epoch permutation

use ndarray::{Array2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{Error, Result};

/// Encoded examples served in fixed-size batches
///
/// Batches are contiguous slices of the current permutation; a trailing
/// partial batch is never produced.
#[derive(Debug, Clone)]
pub struct DatasetBuffer {
    examples: Array2<f32>,
    batch_size: usize,
    permutation: Vec<usize>,
}

impl DatasetBuffer {
    pub fn new(examples: Array2<f32>, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::Configuration(
                "Invalid batch size: 0 (must be > 0)".to_string(),
            ));
        }
        let n = examples.nrows();
        if n < batch_size {
            return Err(Error::InsufficientData {
                examples: n,
                batch_size,
            });
        }
        Ok(Self {
            examples,
            batch_size,
            permutation: (0..n).collect(),
        })
    }

    /// Draw a fresh uniform permutation
    pub fn reshuffle<R: Rng>(&mut self, rng: &mut R) {
        self.permutation.shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.examples.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.nrows() == 0
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Width of one encoded example
    pub fn features(&self) -> usize {
        self.examples.ncols()
    }

    pub fn total_batches(&self) -> usize {
        self.len() / self.batch_size
    }

    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Rows `[i * batch_size, (i + 1) * batch_size)` of the permutation
    pub fn batch(&self, index: usize) -> Option<Array2<f32>> {
        if index >= self.total_batches() {
            return None;
        }
        let start = index * self.batch_size;
        let rows = &self.permutation[start..start + self.batch_size];
        Some(self.examples.select(Axis(0), rows))
    }
}
