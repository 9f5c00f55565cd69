//! Run configuration: schema, YAML loading, CLI overrides and validation

mod cli;
mod loader;
mod run;
mod schema;
mod validate;

pub use cli::{apply_overrides, parse_args, Cli, Command, TrainArgs, ValidateArgs};
pub use loader::{load_config, parse_config};
pub use run::{resolve_seed, train_from_config, train_from_yaml};
pub use schema::{DataConfig, ModelConfig, OptimSpec, OutputConfig, TrainingParams, WganConfig};
pub use validate::{validate_config, ValidationError};
