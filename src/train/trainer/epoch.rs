//! Epoch-level training

use super::core::WganTrainer;
use crate::gan::{Critic, Generator};
use crate::train::record::ProgressRecord;
use crate::Result;

impl<G: Generator, C: Critic> WganTrainer<G, C> {
    /// One pass over the reshuffled dataset
    ///
    /// Each generator iteration is a critic phase followed by one generator
    /// step, a progress record and a checkpoint check.
    pub fn train_epoch(&mut self) -> Result<()> {
        self.dataset.reshuffle(&mut self.state.rng);
        self.state.batch_index = 0;
        let total_batches = self.dataset.total_batches();

        while self.state.batch_index < total_batches {
            let critic = self.critic_phase()?.unwrap_or_default();
            let generator_loss = self.generator_step()?;

            let record = ProgressRecord {
                epoch: self.state.epoch,
                batch_index: self.state.batch_index,
                total_batches,
                generator_iteration: self.state.generator_iteration,
                critic_loss: critic.loss(),
                generator_loss,
                critic_loss_real: critic.real,
                critic_loss_fake: critic.fake,
            };
            record.emit();
            self.history.push(record);

            self.maybe_checkpoint()?;
        }

        self.state.epoch += 1;
        Ok(())
    }
}
