//! Training loop configuration

use super::schedule::CriticSchedule;
use crate::optim::OptimizerKind;

/// Settings consumed by `WganTrainer`
#[derive(Debug, Clone, PartialEq)]
pub struct TrainerConfig {
    /// Passes over the dataset
    pub epochs: usize,
    /// Critic steps per generator step
    pub schedule: CriticSchedule,
    /// Critic weight clip bounds
    pub clip: (f32, f32),
    /// Optimizer used for both networks
    pub optimizer: OptimizerKind,
    pub generator_lr: f32,
    pub critic_lr: f32,
    /// Adam first-moment decay
    pub beta1: f32,
    /// Checkpoint every N generator iterations (0 disables)
    pub checkpoint_interval: usize,
    /// Problem identifier used in checkpoint names
    pub problem: usize,
    /// Seed for shuffling and noise
    pub seed: u64,
    /// Rows of the fixed visualization noise
    pub sample_count: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            epochs: 1,
            schedule: CriticSchedule::default(),
            clip: (-0.01, 0.01),
            optimizer: OptimizerKind::Adam,
            generator_lr: 1e-7,
            critic_lr: 1e-7,
            beta1: 0.7,
            checkpoint_interval: 50,
            problem: 0,
            seed: 0,
            sample_count: 32,
        }
    }
}

impl TrainerConfig {
    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_schedule(mut self, schedule: CriticSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_clip(mut self, lower: f32, upper: f32) -> Self {
        self.clip = (lower, upper);
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerKind) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_learning_rates(mut self, generator_lr: f32, critic_lr: f32) -> Self {
        self.generator_lr = generator_lr;
        self.critic_lr = critic_lr;
        self
    }

    pub fn with_beta1(mut self, beta1: f32) -> Self {
        self.beta1 = beta1;
        self
    }

    pub fn with_checkpoint_interval(mut self, interval: usize) -> Self {
        self.checkpoint_interval = interval;
        self
    }

    pub fn with_problem(mut self, problem: usize) -> Self {
        self.problem = problem;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_sample_count(mut self, rows: usize) -> Self {
        self.sample_count = rows;
        self
    }
}
