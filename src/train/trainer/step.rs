//! Critic and generator update steps

use ndarray::Array2;

use super::core::WganTrainer;
use crate::gan::{Critic, Generator, Model};
use crate::Result;

/// Raw mean scores from one critic update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CriticStep {
    pub real: f32,
    pub fake: f32,
}

impl CriticStep {
    /// `real - fake`, the quantity the critic descends on
    pub fn loss(&self) -> f32 {
        self.real - self.fake
    }
}

impl<G: Generator, C: Critic> WganTrainer<G, C> {
    /// Run up to the scheduled number of critic steps
    ///
    /// Stops early once the epoch's batches are used up. Returns the last
    /// step taken, if any.
    pub(crate) fn critic_phase(&mut self) -> Result<Option<CriticStep>> {
        self.critic.set_requires_grad(true);
        let steps = self
            .config
            .schedule
            .critic_steps(self.state.generator_iteration);

        let mut last = None;
        let mut taken = 0;
        while taken < steps {
            let Some(real) = self.dataset.batch(self.state.batch_index) else {
                break;
            };
            self.state.batch_index += 1;
            last = Some(self.critic_step(&real)?);
            taken += 1;
        }

        tracing::debug!(
            generator_iteration = self.state.generator_iteration,
            scheduled = steps,
            taken,
            batch = self.state.batch_index,
            "critic phase"
        );
        Ok(last)
    }

    /// One clipped critic update on a real batch and a fresh fake batch
    pub(crate) fn critic_step(&mut self, real: &Array2<f32>) -> Result<CriticStep> {
        self.clipper.clip(&mut self.critic.parameters_mut());
        self.critic.zero_grad();

        let real_pass = self.critic.forward(real, true);
        self.critic.backward(&real_pass, 1.0)?;

        let z = self
            .state
            .sample_noise(real.nrows(), self.generator.latent_size());
        let fake = self.generator.forward(&z, false).into_output();
        let fake_pass = self.critic.forward(&fake, true);
        self.critic.backward(&fake_pass, -1.0)?;

        self.critic_optimizer.step(&mut self.critic.parameters_mut());

        Ok(CriticStep {
            real: real_pass.score(),
            fake: fake_pass.score(),
        })
    }

    /// One generator update through the frozen critic
    ///
    /// Returns the critic's mean score on the generated batch.
    pub(crate) fn generator_step(&mut self) -> Result<f32> {
        self.critic.set_requires_grad(false);
        self.generator.zero_grad();

        let z = self
            .state
            .sample_noise(self.dataset.batch_size(), self.generator.latent_size());
        let pass = self.generator.forward(&z, true);
        let critic_pass = self.critic.forward(pass.output(), true);
        let grad = self.critic.backward(&critic_pass, 1.0)?;
        self.generator.backward(&pass, &grad)?;
        self.generator_optimizer
            .step(&mut self.generator.parameters_mut());

        self.state.generator_iteration += 1;
        Ok(critic_pass.score())
    }
}
