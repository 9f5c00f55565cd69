//! Single-command training from a resolved configuration

use std::path::Path;

use rand::Rng;

use super::loader::load_config;
use super::schema::WganConfig;
use super::validate::validate_config;
use crate::data::{load_levels, DatasetBuffer, TileEncoding};
use crate::error::Result;
use crate::gan::{MlpCritic, MlpGenerator, Model};
use crate::io::FileCheckpointWriter;
use crate::render::TileRenderer;
use crate::train::{TrainSummary, WganTrainer};

/// Seed used when the configuration leaves it unset
pub fn resolve_seed(config: &WganConfig) -> u64 {
    config
        .training
        .seed
        .unwrap_or_else(|| rand::rng().random_range(1..=10_000))
}

/// Train the reference networks from a configuration
///
/// This is the main entry point for a run. It:
/// 1. Validates the configuration
/// 2. Loads and encodes the level set
/// 3. Builds both networks, optionally from saved weights
/// 4. Runs the training loop, writing checkpoints to the output directory
///
/// # Example
///
/// ```no_run
/// use tilegan::config::{train_from_config, WganConfig};
///
/// let config = WganConfig::default().with_data_path("levels.json").with_seed(7);
/// let summary = train_from_config(&config)?;
/// println!("{} generator iterations", summary.generator_iteration);
/// # Ok::<(), tilegan::Error>(())
/// ```
pub fn train_from_config(config: &WganConfig) -> Result<TrainSummary> {
    validate_config(config)?;

    let seed = resolve_seed(config);
    tracing::info!(seed, "resolved random seed");

    let encoding = TileEncoding::new(
        config.data.tile_classes,
        config.data.canvas,
        config.data.empty_tile,
    )?;
    let levels = load_levels(&config.data.path)?;
    let examples = encoding.encode_all(&levels)?;
    let dataset = DatasetBuffer::new(examples, config.data.batch_size)?;
    tracing::info!(
        examples = dataset.len(),
        extent = ?levels.extent(),
        features = dataset.features(),
        total_batches = dataset.total_batches(),
        "dataset ready"
    );

    let mut generator = MlpGenerator::with_seed(config.generator_config(), seed.wrapping_add(1))?;
    if let Some(path) = &config.model.generator_weights {
        generator.load_state(path)?;
        tracing::info!(path = %path.display(), "loaded generator weights");
    }
    let mut critic = MlpCritic::with_seed(config.critic_config(), seed.wrapping_add(2))?;
    if let Some(path) = &config.model.critic_weights {
        critic.load_state(path)?;
        tracing::info!(path = %path.display(), "loaded critic weights");
    }
    tracing::debug!(architecture = %generator.architecture(), parameters = generator.num_parameters());
    tracing::debug!(architecture = %critic.architecture(), parameters = critic.num_parameters());

    let renderer = TileRenderer::new(config.data.tile_classes, config.output.tile_pixels);
    let writer = FileCheckpointWriter::create(&config.output.dir, renderer)?;

    let mut trainer = WganTrainer::new(
        generator,
        critic,
        dataset,
        encoding,
        config.trainer_config(seed)?,
    )?
    .with_checkpoint_writer(Box::new(writer));
    trainer.train()
}

/// Load, validate and train from a YAML file
pub fn train_from_yaml<P: AsRef<Path>>(config_path: P) -> Result<TrainSummary> {
    let config = load_config(config_path)?;
    train_from_config(&config)
}
