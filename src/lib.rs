//! # tilegan
//!
//! Wasserstein GAN training for tile-based game levels.
//!
//! Levels are grids of categorical tile ids. They are one-hot encoded onto
//! a square canvas, and a generator learns to produce per-cell class
//! distributions that a weight-clipped critic cannot tell apart from real
//! levels.
//!
//! - [`data`]: level loading, one-hot encoding, shuffled batching
//! - [`nn`]: parameters with explicit gradients, layers, initialization
//! - [`gan`]: generator and critic traits plus reference MLP networks
//! - [`optim`]: Adam and RMSprop
//! - [`train`]: the WGAN loop, critic schedule and weight clipping
//! - [`io`]: state dicts and checkpoint files
//! - [`render`]: tile grids to composite PNG images
//! - [`config`]: YAML configuration, CLI arguments and validation

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod gan;
pub mod io;
pub mod nn;
pub mod optim;
pub mod render;
pub mod train;

pub use error::{Error, Result};
