//! Critic weight clipping

use crate::nn::Param;
use crate::{Error, Result};

/// Clamps every critic parameter element into `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightClipper {
    lower: f32,
    upper: f32,
}

impl Default for WeightClipper {
    fn default() -> Self {
        Self {
            lower: -0.01,
            upper: 0.01,
        }
    }
}

impl WeightClipper {
    pub fn new(lower: f32, upper: f32) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(Error::Configuration(format!(
                "Invalid clip bounds: [{lower}, {upper}] (must be finite)"
            )));
        }
        if lower > upper {
            return Err(Error::Configuration(format!(
                "Invalid clip bounds: [{lower}, {upper}] (lower must be <= upper)"
            )));
        }
        Ok(Self { lower, upper })
    }

    pub fn bounds(&self) -> (f32, f32) {
        (self.lower, self.upper)
    }

    /// Clamp in place; frozen parameters are clipped too
    pub fn clip(&self, params: &mut [&mut Param]) {
        for param in params.iter_mut() {
            param
                .data_mut()
                .mapv_inplace(|v| v.clamp(self.lower, self.upper));
        }
    }
}
