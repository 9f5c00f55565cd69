//! Declarative run configuration
//!
//! Every field has a default, so an empty YAML document (or no file at all)
//! describes a complete run. CLI flags override individual fields.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::gan::{CriticConfig, GeneratorConfig};
use crate::optim::OptimizerKind;
use crate::train::{CriticSchedule, TrainerConfig};
use crate::Result;

/// Complete run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WganConfig {
    pub data: DataConfig,
    pub model: ModelConfig,
    pub optimizer: OptimSpec,
    pub training: TrainingParams,
    pub output: OutputConfig,
}

/// Level data and its encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON level file
    pub path: PathBuf,
    /// Size of the tile vocabulary
    pub tile_classes: usize,
    /// Side of the square canvas examples are padded to
    pub canvas: usize,
    /// Class written into padded cells
    pub empty_tile: usize,
    pub batch_size: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("levels.json"),
            tile_classes: 6,
            canvas: 32,
            empty_tile: 2,
            batch_size: 32,
        }
    }
}

/// Network sizes and optional starting weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub latent_size: usize,
    pub generator_hidden: usize,
    pub critic_hidden: usize,
    /// Extra hidden layers in both networks
    pub extra_layers: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator_weights: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critic_weights: Option<PathBuf>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            latent_size: 10,
            generator_hidden: 64,
            critic_hidden: 64,
            extra_layers: 0,
            generator_weights: None,
            critic_weights: None,
        }
    }
}

/// Optimizer choice and hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimSpec {
    /// "adam" or "rmsprop"
    pub name: String,
    pub generator_lr: f32,
    pub critic_lr: f32,
    /// Adam first-moment decay
    pub beta1: f32,
}

impl Default for OptimSpec {
    fn default() -> Self {
        Self {
            name: "adam".to_string(),
            generator_lr: 1e-7,
            critic_lr: 1e-7,
            beta1: 0.7,
        }
    }
}

/// Loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    pub epochs: usize,
    /// Critic steps per generator step outside warm-up and re-sync
    pub critic_steps: usize,
    pub warmup_iterations: usize,
    pub resync_interval: usize,
    pub burst_steps: usize,
    pub clip_lower: f32,
    pub clip_upper: f32,
    /// Checkpoint every N generator iterations
    pub checkpoint_interval: usize,
    pub problem: usize,
    /// Random when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Compute device; only "cpu" is available
    pub device: String,
}

impl Default for TrainingParams {
    fn default() -> Self {
        let schedule = CriticSchedule::default();
        Self {
            epochs: 1,
            critic_steps: schedule.default_steps,
            warmup_iterations: schedule.warmup_iterations,
            resync_interval: schedule.resync_interval,
            burst_steps: schedule.burst_steps,
            clip_lower: -0.01,
            clip_upper: 0.01,
            checkpoint_interval: 50,
            problem: 0,
            seed: None,
            device: "cpu".to_string(),
        }
    }
}

/// Where checkpoints go and how samples are drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Pixels per tile side in sample images
    pub tile_pixels: u32,
    /// Rows of fixed noise; defaults to the batch size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("GAN_output"),
            tile_pixels: 1,
            sample_count: None,
        }
    }
}

impl WganConfig {
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data.path = path.into();
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.data.batch_size = batch_size;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.training.epochs = epochs;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.training.seed = Some(seed);
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output.dir = dir.into();
        self
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            latent_size: self.model.latent_size,
            hidden: self.model.generator_hidden,
            extra_layers: self.model.extra_layers,
            tile_classes: self.data.tile_classes,
            canvas: self.data.canvas,
        }
    }

    pub fn critic_config(&self) -> CriticConfig {
        CriticConfig {
            tile_classes: self.data.tile_classes,
            canvas: self.data.canvas,
            hidden: self.model.critic_hidden,
            extra_layers: self.model.extra_layers,
        }
    }

    pub fn schedule(&self) -> CriticSchedule {
        CriticSchedule::new(self.training.critic_steps)
            .with_warmup(self.training.warmup_iterations)
            .with_resync_interval(self.training.resync_interval)
            .with_burst(self.training.burst_steps)
    }

    /// Resolve loop settings for a concrete seed
    pub fn trainer_config(&self, seed: u64) -> Result<TrainerConfig> {
        let optimizer: OptimizerKind = self.optimizer.name.parse()?;
        Ok(TrainerConfig::default()
            .with_epochs(self.training.epochs)
            .with_schedule(self.schedule())
            .with_clip(self.training.clip_lower, self.training.clip_upper)
            .with_optimizer(optimizer)
            .with_learning_rates(self.optimizer.generator_lr, self.optimizer.critic_lr)
            .with_beta1(self.optimizer.beta1)
            .with_checkpoint_interval(self.training.checkpoint_interval)
            .with_problem(self.training.problem)
            .with_seed(seed)
            .with_sample_count(self.output.sample_count.unwrap_or(self.data.batch_size)))
    }
}
