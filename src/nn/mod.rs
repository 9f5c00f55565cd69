//! Minimal neural network building blocks
//!
//! Parameters carry their own gradient buffers; layers implement forward
//! and backward by hand over `ndarray` matrices.

pub mod init;
pub mod layers;
pub mod mlp;
pub mod param;

pub use init::{init_layer, init_weights, sample_normal};
pub use layers::{Activation, ChannelSoftmax, Dense, Layer, LayerKind, LayerNorm};
pub use mlp::{HiddenBlock, Mlp, MlpTape};
pub use param::Param;
