//! Wasserstein GAN models for tile grids
//!
//! # Architecture
//!
//! ```text
//! Latent z ~ N(0, I) ─► Generator ─► per-cell class distribution ─┐
//!                                                                 ├─► Critic ─► mean score
//! Encoded real levels ────────────────────────────────────────────┘
//! ```
//!
//! The trainer talks to the networks through the `Generator` and `Critic`
//! traits; `MlpGenerator` and `MlpCritic` are small fully connected
//! reference implementations.

mod config;
mod critic;
mod generator;
mod latent;
mod model;

pub use config::{CriticConfig, GeneratorConfig};
pub use critic::MlpCritic;
pub use generator::MlpGenerator;
pub use latent::sample_latent;
pub use model::{Critic, CriticForward, Forward, Generator, Model};
