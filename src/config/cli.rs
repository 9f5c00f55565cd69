//! Command-line surface: `Cli`, subcommands and overrides

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::schema::WganConfig;

/// tilegan: Wasserstein GAN training for tile-based game levels
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "tilegan")]
#[command(version)]
#[command(about = "Train a Wasserstein GAN on one-hot encoded tile levels")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Train generator and critic
    Train(TrainArgs),

    /// Validate a configuration without training
    Validate(ValidateArgs),
}

/// Arguments for the train command
///
/// Every flag overrides the matching field of the YAML configuration (or
/// of the defaults when no file is given).
#[derive(Parser, Debug, Clone, PartialEq, Default)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON level file
    #[arg(long, alias = "json")]
    pub data: Option<PathBuf>,

    /// Latent vector size
    #[arg(long, alias = "nz")]
    pub latent_size: Option<usize>,

    /// Generator hidden width
    #[arg(long, alias = "ngf")]
    pub generator_hidden: Option<usize>,

    /// Critic hidden width
    #[arg(long, alias = "ndf")]
    pub critic_hidden: Option<usize>,

    /// Extra hidden layers in both networks
    #[arg(long)]
    pub extra_layers: Option<usize>,

    /// Override batch size
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Override number of epochs
    #[arg(short, long, alias = "niter")]
    pub epochs: Option<usize>,

    /// Critic learning rate
    #[arg(long, alias = "lr-d")]
    pub critic_lr: Option<f32>,

    /// Generator learning rate
    #[arg(long, alias = "lr-g")]
    pub generator_lr: Option<f32>,

    /// Adam first-moment decay
    #[arg(long)]
    pub beta1: Option<f32>,

    /// Optimizer for both networks (adam, rmsprop)
    #[arg(long)]
    pub optimizer: Option<String>,

    /// Compute device
    #[arg(long)]
    pub device: Option<String>,

    /// Critic steps per generator step
    #[arg(long, alias = "d-iters")]
    pub critic_steps: Option<usize>,

    /// Lower critic weight bound
    #[arg(long, allow_negative_numbers = true)]
    pub clip_lower: Option<f32>,

    /// Upper critic weight bound
    #[arg(long, allow_negative_numbers = true)]
    pub clip_upper: Option<f32>,

    /// Generator weights to start from
    #[arg(long, alias = "net-g")]
    pub generator_weights: Option<PathBuf>,

    /// Critic weights to start from
    #[arg(long, alias = "net-d")]
    pub critic_weights: Option<PathBuf>,

    /// Override output directory
    #[arg(short, long, alias = "experiment")]
    pub output_dir: Option<PathBuf>,

    /// Problem id used in checkpoint names
    #[arg(long)]
    pub problem: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Checkpoint every N generator iterations
    #[arg(long)]
    pub save_every: Option<usize>,

    /// Validate and print the resolved configuration without training
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Print the resolved configuration
    #[arg(short, long)]
    pub detailed: bool,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a configuration
pub fn apply_overrides(config: &mut WganConfig, args: &TrainArgs) {
    fn set<T: Clone>(field: &mut T, value: &Option<T>) {
        if let Some(value) = value {
            *field = value.clone();
        }
    }

    set(&mut config.data.path, &args.data);
    set(&mut config.data.batch_size, &args.batch_size);
    set(&mut config.model.latent_size, &args.latent_size);
    set(&mut config.model.generator_hidden, &args.generator_hidden);
    set(&mut config.model.critic_hidden, &args.critic_hidden);
    set(&mut config.model.extra_layers, &args.extra_layers);
    if args.generator_weights.is_some() {
        config.model.generator_weights = args.generator_weights.clone();
    }
    if args.critic_weights.is_some() {
        config.model.critic_weights = args.critic_weights.clone();
    }
    set(&mut config.optimizer.name, &args.optimizer);
    set(&mut config.optimizer.generator_lr, &args.generator_lr);
    set(&mut config.optimizer.critic_lr, &args.critic_lr);
    set(&mut config.optimizer.beta1, &args.beta1);
    set(&mut config.training.epochs, &args.epochs);
    set(&mut config.training.critic_steps, &args.critic_steps);
    set(&mut config.training.clip_lower, &args.clip_lower);
    set(&mut config.training.clip_upper, &args.clip_upper);
    set(&mut config.training.checkpoint_interval, &args.save_every);
    set(&mut config.training.problem, &args.problem);
    set(&mut config.training.device, &args.device);
    if args.seed.is_some() {
        config.training.seed = args.seed;
    }
    set(&mut config.output.dir, &args.output_dir);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train_args(argv: &[&str]) -> TrainArgs {
        let cli = parse_args(argv.iter().copied()).unwrap();
        match cli.command {
            Command::Train(args) => args,
            other => panic!("expected train, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_train_without_config() {
        let args = train_args(&["tilegan", "train"]);
        assert_eq!(args, TrainArgs::default());
    }

    #[test]
    fn test_parse_train_overrides() {
        let args = train_args(&[
            "tilegan",
            "train",
            "run.yaml",
            "--batch-size",
            "16",
            "--optimizer",
            "rmsprop",
            "--clip-lower",
            "-0.05",
            "--clip-upper",
            "0.05",
            "--seed",
            "42",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("run.yaml")));
        assert_eq!(args.batch_size, Some(16));
        assert_eq!(args.optimizer.as_deref(), Some("rmsprop"));
        assert_eq!(args.clip_lower, Some(-0.05));
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn test_parse_aliases() {
        let args = train_args(&["tilegan", "train", "--nz", "32", "--d-iters", "3", "--niter", "7"]);
        assert_eq!(args.latent_size, Some(32));
        assert_eq!(args.critic_steps, Some(3));
        assert_eq!(args.epochs, Some(7));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = parse_args(["tilegan", "validate", "run.yaml", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(matches!(cli.command, Command::Validate(ref a) if !a.detailed));
    }

    #[test]
    fn test_validate_requires_config() {
        assert!(parse_args(["tilegan", "validate"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = WganConfig::default();
        let args = TrainArgs {
            batch_size: Some(8),
            epochs: Some(3),
            critic_lr: Some(5e-5),
            critic_weights: Some(PathBuf::from("critic.json")),
            seed: Some(11),
            output_dir: Some(PathBuf::from("runs/a")),
            ..Default::default()
        };
        apply_overrides(&mut config, &args);

        assert_eq!(config.data.batch_size, 8);
        assert_eq!(config.training.epochs, 3);
        assert_eq!(config.optimizer.critic_lr, 5e-5);
        assert_eq!(config.optimizer.generator_lr, 1e-7);
        assert_eq!(config.model.critic_weights, Some(PathBuf::from("critic.json")));
        assert_eq!(config.model.generator_weights, None);
        assert_eq!(config.training.seed, Some(11));
        assert_eq!(config.output.dir, PathBuf::from("runs/a"));
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = WganConfig::default().with_batch_size(4);
        apply_overrides(&mut config, &TrainArgs::default());
        assert_eq!(config, WganConfig::default().with_batch_size(4));
    }
}
