//! Critic updates per generator iteration

use serde::{Deserialize, Serialize};

/// How many critic steps precede each generator step
///
/// Early iterations and periodic re-sync points use a long burst so the
/// critic stays close to optimal; otherwise the default count applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticSchedule {
    /// Steps outside warm-up and re-sync points
    pub default_steps: usize,
    /// Generator iterations below this use the burst
    pub warmup_iterations: usize,
    /// Every multiple of this uses the burst (0 disables)
    pub resync_interval: usize,
    /// Steps during warm-up and re-sync
    pub burst_steps: usize,
}

impl Default for CriticSchedule {
    fn default() -> Self {
        Self::new(5)
    }
}

impl CriticSchedule {
    pub fn new(default_steps: usize) -> Self {
        Self {
            default_steps,
            warmup_iterations: 25,
            resync_interval: 500,
            burst_steps: 100,
        }
    }

    pub fn with_warmup(mut self, iterations: usize) -> Self {
        self.warmup_iterations = iterations;
        self
    }

    pub fn with_resync_interval(mut self, interval: usize) -> Self {
        self.resync_interval = interval;
        self
    }

    pub fn with_burst(mut self, steps: usize) -> Self {
        self.burst_steps = steps;
        self
    }

    /// Critic steps for generator iteration `g`
    pub fn critic_steps(&self, generator_iteration: usize) -> usize {
        let warmup = generator_iteration < self.warmup_iterations;
        let resync = self.resync_interval > 0 && generator_iteration % self.resync_interval == 0;
        if warmup || resync {
            self.burst_steps
        } else {
            self.default_steps
        }
    }
}
