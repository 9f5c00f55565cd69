//! Validation error types

/// Reasons a run configuration is rejected before training starts
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Level data path does not exist: {0}")]
    DataPathNotFound(String),

    #[error("Weights file does not exist: {0}")]
    WeightsNotFound(String),

    #[error("Invalid learning rate: {0} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate(f32),

    #[error("Invalid beta1: {0} (must be in [0.0, 1.0))")]
    InvalidBeta1(f32),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid optimizer: {0} (must be one of: adam, rmsprop)")]
    InvalidOptimizer(String),

    #[error("Unsupported device: {0} (only cpu is available)")]
    UnsupportedDevice(String),

    #[error("Invalid critic steps: {0} (must be > 0)")]
    InvalidCriticSteps(usize),

    #[error("Invalid clip bounds: [{0}, {1}] (must be finite with lower <= upper)")]
    InvalidClipBounds(f32, f32),

    #[error("Invalid {0}: {1} (must be > 0)")]
    InvalidSize(&'static str, usize),

    #[error("Invalid empty tile: {0} (must be < tile classes {1})")]
    InvalidEmptyTile(usize, usize),

    #[error("Invalid save interval: {0} (must be > 0)")]
    InvalidSaveInterval(usize),
}
