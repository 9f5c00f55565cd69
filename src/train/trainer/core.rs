//! Core WganTrainer struct and basic methods

use crate::data::{DatasetBuffer, TileEncoding};
use crate::gan::{Critic, Generator};
use crate::io::CheckpointWriter;
use crate::optim::Optimizer;
use crate::train::clip::WeightClipper;
use crate::train::config::TrainerConfig;
use crate::train::record::{ProgressRecord, TrainSummary};
use crate::train::state::TrainingState;
use crate::{Error, Result};

/// Owns both networks and everything needed to train them
pub struct WganTrainer<G: Generator, C: Critic> {
    pub(crate) generator: G,
    pub(crate) critic: C,
    pub(crate) generator_optimizer: Box<dyn Optimizer>,
    pub(crate) critic_optimizer: Box<dyn Optimizer>,
    pub(crate) clipper: WeightClipper,
    pub(crate) dataset: DatasetBuffer,
    pub(crate) encoding: TileEncoding,
    pub(crate) config: TrainerConfig,
    pub(crate) writer: Option<Box<dyn CheckpointWriter>>,
    pub(crate) state: TrainingState,
    pub(crate) history: Vec<ProgressRecord>,
    pub(crate) checkpoints: Vec<usize>,
}

impl<G: Generator, C: Critic> WganTrainer<G, C> {
    /// Create a trainer, checking that every size agrees
    ///
    /// Optimizers are built from `config.optimizer`; replace them with
    /// `with_optimizers`.
    pub fn new(
        generator: G,
        critic: C,
        dataset: DatasetBuffer,
        encoding: TileEncoding,
        config: TrainerConfig,
    ) -> Result<Self> {
        let features = dataset.features();
        for (what, size) in [
            ("generator output", generator.output_size()),
            ("critic input", critic.input_size()),
            ("tile encoding", encoding.features()),
        ] {
            if size != features {
                return Err(Error::Configuration(format!(
                    "{what} size {size} does not match example size {features}"
                )));
            }
        }
        if config.schedule.default_steps == 0 {
            return Err(Error::Configuration(
                "Invalid critic steps: 0 (must be > 0)".to_string(),
            ));
        }
        if config.sample_count == 0 {
            return Err(Error::Configuration(
                "Invalid sample count: 0 (must be > 0)".to_string(),
            ));
        }
        let clipper = WeightClipper::new(config.clip.0, config.clip.1)?;
        let generator_optimizer = config.optimizer.build(config.generator_lr, config.beta1);
        let critic_optimizer = config.optimizer.build(config.critic_lr, config.beta1);
        let state = TrainingState::new(config.seed, config.sample_count, generator.latent_size());

        Ok(Self {
            generator,
            critic,
            generator_optimizer,
            critic_optimizer,
            clipper,
            dataset,
            encoding,
            config,
            writer: None,
            state,
            history: Vec::new(),
            checkpoints: Vec::new(),
        })
    }

    /// Replace both optimizers
    pub fn with_optimizers(
        mut self,
        generator_optimizer: Box<dyn Optimizer>,
        critic_optimizer: Box<dyn Optimizer>,
    ) -> Self {
        self.generator_optimizer = generator_optimizer;
        self.critic_optimizer = critic_optimizer;
        self
    }

    /// Send checkpoints to `writer`; without one, triggers are skipped
    pub fn with_checkpoint_writer(mut self, writer: Box<dyn CheckpointWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn critic(&self) -> &C {
        &self.critic
    }

    pub fn state(&self) -> &TrainingState {
        &self.state
    }

    pub fn dataset(&self) -> &DatasetBuffer {
        &self.dataset
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    pub fn history(&self) -> &[ProgressRecord] {
        &self.history
    }

    pub fn summary(&self) -> TrainSummary {
        TrainSummary {
            history: self.history.clone(),
            generator_iteration: self.state.generator_iteration,
            epochs: self.state.epoch,
            checkpoints: self.checkpoints.clone(),
        }
    }

    /// Give back the trained networks
    pub fn into_models(self) -> (G, C) {
        (self.generator, self.critic)
    }
}
