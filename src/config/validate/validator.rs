//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::WganConfig;

const OPTIMIZERS: [&str; 2] = ["adam", "rmsprop"];

/// Validate a run configuration
///
/// Checks:
/// - Input files exist
/// - Sizes and counts are positive
/// - Optimizer, device and clip bounds are usable
pub fn validate_config(config: &WganConfig) -> Result<(), ValidationError> {
    if !config.data.path.exists() {
        return Err(ValidationError::DataPathNotFound(
            config.data.path.display().to_string(),
        ));
    }
    for path in [&config.model.generator_weights, &config.model.critic_weights]
        .into_iter()
        .flatten()
    {
        if !path.exists() {
            return Err(ValidationError::WeightsNotFound(path.display().to_string()));
        }
    }

    if config.data.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(0));
    }
    let sizes = [
        ("tile classes", config.data.tile_classes),
        ("canvas", config.data.canvas),
        ("latent size", config.model.latent_size),
        ("generator hidden size", config.model.generator_hidden),
        ("critic hidden size", config.model.critic_hidden),
        ("tile pixels", config.output.tile_pixels as usize),
    ];
    if let Some((name, value)) = sizes.into_iter().find(|(_, value)| *value == 0) {
        return Err(ValidationError::InvalidSize(name, value));
    }
    if config.data.empty_tile >= config.data.tile_classes {
        return Err(ValidationError::InvalidEmptyTile(
            config.data.empty_tile,
            config.data.tile_classes,
        ));
    }
    if config.output.sample_count == Some(0) {
        return Err(ValidationError::InvalidSize("sample count", 0));
    }

    for lr in [config.optimizer.generator_lr, config.optimizer.critic_lr] {
        if !(lr > 0.0 && lr <= 1.0) {
            return Err(ValidationError::InvalidLearningRate(lr));
        }
    }
    if !(0.0..1.0).contains(&config.optimizer.beta1) {
        return Err(ValidationError::InvalidBeta1(config.optimizer.beta1));
    }
    if !OPTIMIZERS.contains(&config.optimizer.name.as_str()) {
        return Err(ValidationError::InvalidOptimizer(config.optimizer.name.clone()));
    }

    let training = &config.training;
    if training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(0));
    }
    if training.critic_steps == 0 {
        return Err(ValidationError::InvalidCriticSteps(0));
    }
    let (lower, upper) = (training.clip_lower, training.clip_upper);
    if !lower.is_finite() || !upper.is_finite() || lower > upper {
        return Err(ValidationError::InvalidClipBounds(lower, upper));
    }
    if training.checkpoint_interval == 0 {
        return Err(ValidationError::InvalidSaveInterval(0));
    }
    if training.device != "cpu" {
        return Err(ValidationError::UnsupportedDevice(training.device.clone()));
    }

    Ok(())
}
