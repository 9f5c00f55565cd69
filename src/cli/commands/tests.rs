//! CLI command tests

use super::*;
use crate::cli::LogLevel;
use crate::config::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_levels(dir: &Path) -> PathBuf {
    let path = dir.join("levels.json");
    let levels: Vec<[[usize; 3]; 3]> = (0..8)
        .map(|i| [[i % 6, 2, 2], [1, i % 3, 0], [5, 4, 3]])
        .collect();
    std::fs::write(&path, serde_json::to_string(&levels).unwrap()).unwrap();
    path
}

/// Create a small valid config file
fn create_test_config(dir: &TempDir) -> PathBuf {
    let config_path = dir.path().join("run.yaml");
    let levels = write_levels(dir.path());
    let output = dir.path().join("output");

    let config = format!(
        r#"
data:
  path: {}
  canvas: 4
  batch_size: 2

model:
  generator_hidden: 8
  critic_hidden: 8

training:
  epochs: 2
  critic_steps: 1
  checkpoint_interval: 1
  seed: 5

output:
  dir: {}
"#,
        levels.display(),
        output.display()
    );

    std::fs::write(&config_path, config).unwrap();
    config_path
}

#[test]
fn test_validate_command_basic() {
    let dir = TempDir::new().unwrap();
    let args = ValidateArgs {
        config: create_test_config(&dir),
        detailed: true,
    };
    assert!(validate::run_validate(args, LogLevel::Quiet).is_ok());
}

#[test]
fn test_validate_command_invalid() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("bad.yaml");
    std::fs::write(&config_path, "data:\n  batch_size: 0\n").unwrap();

    let args = ValidateArgs {
        config: config_path,
        detailed: false,
    };
    let err = validate::run_validate(args, LogLevel::Quiet).unwrap_err();
    assert!(err.starts_with("Validation failed"));
}

#[test]
fn test_validate_command_missing_file() {
    let args = ValidateArgs {
        config: PathBuf::from("/nonexistent/run.yaml"),
        detailed: false,
    };
    let err = validate::run_validate(args, LogLevel::Quiet).unwrap_err();
    assert!(err.starts_with("Config error"));
}

#[test]
fn test_train_dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let args = TrainArgs {
        config: Some(create_test_config(&dir)),
        dry_run: true,
        ..Default::default()
    };
    assert!(train::run_train(args, LogLevel::Quiet).is_ok());
    assert!(!dir.path().join("output").exists());
}

#[test]
fn test_train_flags_override_file() {
    let dir = TempDir::new().unwrap();
    let args = TrainArgs {
        config: Some(create_test_config(&dir)),
        batch_size: Some(4),
        seed: Some(9),
        ..Default::default()
    };
    let config = train::resolve_config(&args).unwrap();
    assert_eq!(config.data.batch_size, 4);
    assert_eq!(config.data.canvas, 4);
    assert_eq!(config.training.seed, Some(9));
}

#[test]
fn test_train_command_writes_checkpoints() {
    let dir = TempDir::new().unwrap();
    let args = TrainArgs {
        config: Some(create_test_config(&dir)),
        ..Default::default()
    };
    train::run_train(args, LogLevel::Quiet).unwrap();

    // 8 examples in batches of 2: one generator iteration per epoch
    let output = dir.path().join("output");
    assert!(output.join("model_epoch_1_0_10.json").exists());
    assert!(output.join("lode_runner_fakes1.png").exists());
    assert!(output.join("model_epoch_2_0_10.json").exists());
    assert!(!output.join("model_epoch_3_0_10.json").exists());
}

#[test]
fn test_train_command_rejects_unknown_device() {
    let dir = TempDir::new().unwrap();
    let args = TrainArgs {
        config: Some(create_test_config(&dir)),
        device: Some("cuda:0".to_string()),
        ..Default::default()
    };
    let err = train::run_train(args, LogLevel::Quiet).unwrap_err();
    assert!(err.contains("Unsupported device"));
}

#[test]
fn test_run_command_dispatch() {
    let dir = TempDir::new().unwrap();
    let config = create_test_config(&dir);
    let cli = parse_args(["tilegan", "--quiet", "validate", config.to_str().unwrap()]).unwrap();
    assert!(run_command(cli).is_ok());
}
