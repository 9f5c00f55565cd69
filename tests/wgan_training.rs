//! End-to-end training runs with the reference networks

use std::path::Path;

use ndarray::Array2;
use tempfile::TempDir;
use tilegan::data::{parse_levels, DatasetBuffer, TileEncoding};
use tilegan::gan::{CriticConfig, GeneratorConfig, MlpCritic, MlpGenerator, Model};
use tilegan::io::{load_state_dict, FileCheckpointWriter};
use tilegan::render::TileRenderer;
use tilegan::train::{CriticSchedule, TrainerConfig, WganTrainer};

const CANVAS: usize = 3;
const CLASSES: usize = 6;
const LATENT: usize = 4;

fn encoded_levels() -> (TileEncoding, Array2<f32>) {
    let levels = parse_levels(
        "[[[0,1,2],[3,4,5],[2,2,2]],
          [[1,1,1],[0,0,0],[5,5,5]],
          [[2,3,2],[3,2,3],[2,3,2]],
          [[4,0,4],[0,4,0],[4,0,4]]]",
    )
    .unwrap();
    let encoding = TileEncoding::new(CLASSES, CANVAS, 2).unwrap();
    let examples = encoding.encode_all(&levels).unwrap();
    (encoding, examples)
}

fn networks(seed: u64) -> (MlpGenerator, MlpCritic) {
    let generator = MlpGenerator::with_seed(
        GeneratorConfig {
            latent_size: LATENT,
            hidden: 8,
            extra_layers: 1,
            tile_classes: CLASSES,
            canvas: CANVAS,
        },
        seed,
    )
    .unwrap();
    let critic = MlpCritic::with_seed(
        CriticConfig {
            tile_classes: CLASSES,
            canvas: CANVAS,
            hidden: 8,
            extra_layers: 1,
        },
        seed + 1,
    )
    .unwrap();
    (generator, critic)
}

/// One critic step per generator step, no bursts
fn trainer_config(epochs: usize) -> TrainerConfig {
    TrainerConfig::default()
        .with_epochs(epochs)
        .with_schedule(CriticSchedule::new(1).with_warmup(0).with_resync_interval(0))
        .with_learning_rates(1e-4, 1e-4)
        .with_problem(3)
        .with_seed(17)
        .with_sample_count(16)
}

fn trainer(dir: &Path, epochs: usize) -> WganTrainer<MlpGenerator, MlpCritic> {
    let (encoding, examples) = encoded_levels();
    let dataset = DatasetBuffer::new(examples, 1).unwrap();
    let (generator, critic) = networks(1);
    let writer = FileCheckpointWriter::create(dir, TileRenderer::new(CLASSES, 2)).unwrap();
    WganTrainer::new(generator, critic, dataset, encoding, trainer_config(epochs))
        .unwrap()
        .with_checkpoint_writer(Box::new(writer))
}

#[test]
fn test_checkpoint_files_at_interval() {
    let dir = TempDir::new().unwrap();
    // 4 batches per epoch, one critic step each: 4 generator iterations
    let summary = trainer(dir.path(), 13).train().unwrap();

    assert_eq!(summary.generator_iteration, 52);
    assert_eq!(summary.checkpoints, vec![50]);
    assert!(dir.path().join("model_epoch_50_3_4.json").exists());
    assert!(dir.path().join("lode_runner_fakes50.png").exists());
    assert!(!dir.path().join("model_epoch_52_3_4.json").exists());
}

#[test]
fn test_sample_image_layout() {
    let dir = TempDir::new().unwrap();
    trainer(dir.path(), 13).train().unwrap();

    // 16 samples in a 4x4 grid of 3x3 tiles at 2 pixels per tile
    let image = image::open(dir.path().join("lode_runner_fakes50.png")).unwrap();
    assert_eq!((image.width(), image.height()), (24, 24));
}

#[test]
fn test_checkpoint_reloads_into_fresh_generator() {
    let dir = TempDir::new().unwrap();
    trainer(dir.path(), 13).train().unwrap();

    let state = load_state_dict(dir.path().join("model_epoch_50_3_4.json")).unwrap();
    assert_eq!(state.metadata.name, "generator");
    assert_eq!(state.metadata.custom["generator_iteration"], 50);
    assert_eq!(state.metadata.custom["problem"], 3);

    let (mut fresh, _) = networks(99);
    fresh.load_state_dict(&state).unwrap();
    let reloaded = fresh.state_dict();
    for (a, b) in reloaded.parameters.iter().zip(&state.parameters) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.data, b.data);
    }
}

#[test]
fn test_training_is_reproducible() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    let a = trainer(first.path(), 2).train().unwrap();
    let b = trainer(second.path(), 2).train().unwrap();

    assert_eq!(a.loss_pairs(), b.loss_pairs());
    assert_eq!(a.history.len(), 8);
}

#[test]
fn test_critic_weights_stay_clipped() {
    let dir = TempDir::new().unwrap();
    let mut trainer = trainer(dir.path(), 2);
    trainer.train().unwrap();

    // Clipped before every critic forward; one optimizer step can overshoot
    // by a small multiple of the learning rate
    let bound = 0.01 + 10.0 * 1e-4;
    for param in trainer.critic().parameters() {
        assert!(param.data().iter().all(|v| v.abs() <= bound), "{}", param.name());
    }
}

#[test]
fn test_losses_are_finite() {
    let dir = TempDir::new().unwrap();
    let summary = trainer(dir.path(), 3).train().unwrap();
    for record in &summary.history {
        assert!(record.critic_loss.is_finite());
        assert!(record.generator_loss.is_finite());
        assert_eq!(record.critic_loss, record.critic_loss_real - record.critic_loss_fake);
    }
}
