//! Multi-epoch training and checkpoint triggers

use super::core::WganTrainer;
use crate::gan::{Critic, Generator, Model};
use crate::io::Checkpoint;
use crate::train::record::TrainSummary;
use crate::Result;

impl<G: Generator, C: Critic> WganTrainer<G, C> {
    /// Train for `config.epochs` epochs
    pub fn train(&mut self) -> Result<TrainSummary> {
        tracing::info!(
            epochs = self.config.epochs,
            examples = self.dataset.len(),
            batch_size = self.dataset.batch_size(),
            total_batches = self.dataset.total_batches(),
            generator_parameters = self.generator.num_parameters(),
            critic_parameters = self.critic.num_parameters(),
            optimizer = self.generator_optimizer.name(),
            "starting training"
        );

        for _ in 0..self.config.epochs {
            self.train_epoch()?;
        }

        tracing::info!(
            epochs = self.state.epoch,
            generator_iteration = self.state.generator_iteration,
            checkpoints = self.checkpoints.len(),
            "training finished"
        );
        Ok(self.summary())
    }

    /// Write a checkpoint when the generator iteration hits the interval
    ///
    /// Samples come from the fixed noise, generated without gradient and
    /// decoded by per-cell arg-max. Returns whether anything was written.
    pub(crate) fn maybe_checkpoint(&mut self) -> Result<bool> {
        let g = self.state.generator_iteration;
        let interval = self.config.checkpoint_interval;
        if interval == 0 || g % interval != 0 || self.writer.is_none() {
            return Ok(false);
        }

        let output = self
            .generator
            .forward(self.state.fixed_noise(), false)
            .into_output();
        let samples = self.encoding.decode_batch(&output);
        let generator_state = self
            .generator
            .state_dict()
            .with_custom("generator_iteration", serde_json::json!(g))
            .with_custom("problem", serde_json::json!(self.config.problem));

        let checkpoint = Checkpoint {
            generator_iteration: g,
            problem: self.config.problem,
            latent_size: self.generator.latent_size(),
            generator_state: &generator_state,
            samples: &samples,
        };
        if let Some(writer) = self.writer.as_mut() {
            writer.write(&checkpoint)?;
        }
        self.checkpoints.push(g);
        Ok(true)
    }
}
