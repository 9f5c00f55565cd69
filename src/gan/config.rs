//! Configuration types for the reference generator and critic

use serde::{Deserialize, Serialize};

/// Configuration for the generator network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Dimension of the latent space
    pub latent_size: usize,
    /// Width of the hidden layers
    pub hidden: usize,
    /// Hidden layers beyond the first
    pub extra_layers: usize,
    /// Number of tile classes (output channels)
    pub tile_classes: usize,
    /// Side of the square output canvas
    pub canvas: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            latent_size: 10,
            hidden: 64,
            extra_layers: 0,
            tile_classes: 6,
            canvas: 32,
        }
    }
}

impl GeneratorConfig {
    /// Width of one generated example
    pub fn output_size(&self) -> usize {
        self.tile_classes * self.canvas * self.canvas
    }
}

/// Configuration for the critic network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticConfig {
    /// Number of tile classes (input channels)
    pub tile_classes: usize,
    /// Side of the square input canvas
    pub canvas: usize,
    /// Width of the hidden layers
    pub hidden: usize,
    /// Hidden layers beyond the first
    pub extra_layers: usize,
}

impl Default for CriticConfig {
    fn default() -> Self {
        Self {
            tile_classes: 6,
            canvas: 32,
            hidden: 64,
            extra_layers: 0,
        }
    }
}

impl CriticConfig {
    /// Width of one input example
    pub fn input_size(&self) -> usize {
        self.tile_classes * self.canvas * self.canvas
    }
}
