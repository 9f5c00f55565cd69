//! Wasserstein GAN training
//!
//! This module provides:
//! - Critic-update scheduling (warm-up and periodic re-sync bursts)
//! - Critic weight clipping
//! - Training state (counters, RNG, fixed visualization noise)
//! - The `WganTrainer` loop with progress records and checkpoint triggers

mod clip;
mod config;
mod record;
mod schedule;
mod state;
mod trainer;


pub use clip::WeightClipper;
pub use config::TrainerConfig;
pub use record::{ProgressRecord, TrainSummary};
pub use schedule::CriticSchedule;
pub use state::TrainingState;
pub use trainer::{CriticStep, WganTrainer};
