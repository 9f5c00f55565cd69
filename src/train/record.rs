//! Per-iteration progress records and the run summary

use serde::{Deserialize, Serialize};

/// Emitted once per generator iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub epoch: usize,
    pub batch_index: usize,
    pub total_batches: usize,
    pub generator_iteration: usize,
    /// `critic_loss_real - critic_loss_fake` of the last critic step
    pub critic_loss: f32,
    pub generator_loss: f32,
    pub critic_loss_real: f32,
    pub critic_loss_fake: f32,
}

impl ProgressRecord {
    /// Emit as a structured `tracing` event
    pub fn emit(&self) {
        tracing::info!(
            epoch = self.epoch,
            batch = self.batch_index,
            total_batches = self.total_batches,
            generator_iteration = self.generator_iteration,
            critic_loss = self.critic_loss,
            generator_loss = self.generator_loss,
            critic_loss_real = self.critic_loss_real,
            critic_loss_fake = self.critic_loss_fake,
            "progress"
        );
    }
}

/// Result of a training run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainSummary {
    /// Every progress record in order
    pub history: Vec<ProgressRecord>,
    /// Final generator iteration
    pub generator_iteration: usize,
    /// Epochs completed
    pub epochs: usize,
    /// Generator iterations at which a checkpoint was written
    pub checkpoints: Vec<usize>,
}

impl TrainSummary {
    /// `(critic_loss, generator_loss)` per generator iteration
    pub fn loss_pairs(&self) -> Vec<(f32, f32)> {
        self.history
            .iter()
            .map(|r| (r.critic_loss, r.generator_loss))
            .collect()
    }

    pub fn last(&self) -> Option<&ProgressRecord> {
        self.history.last()
    }
}
