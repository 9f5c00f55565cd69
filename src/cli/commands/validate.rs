//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_config, validate_config, ValidateArgs, WganConfig};

/// One line per setting, grouped by section
pub fn format_summary(config: &WganConfig) -> String {
    let lines = [
        "Configuration Summary:".to_string(),
        format!("  Levels: {}", config.data.path.display()),
        format!(
            "  Encoding: {} tile classes on a {}x{} canvas, empty tile {}",
            config.data.tile_classes, config.data.canvas, config.data.canvas, config.data.empty_tile
        ),
        format!("  Batch size: {}", config.data.batch_size),
        format!(
            "  Model: latent {}, generator width {}, critic width {}, extra layers {}",
            config.model.latent_size,
            config.model.generator_hidden,
            config.model.critic_hidden,
            config.model.extra_layers
        ),
        format!(
            "  Optimizer: {} (generator lr={}, critic lr={}, beta1={})",
            config.optimizer.name,
            config.optimizer.generator_lr,
            config.optimizer.critic_lr,
            config.optimizer.beta1
        ),
        format!(
            "  Training: {} epochs, {} critic steps, clip [{}, {}]",
            config.training.epochs,
            config.training.critic_steps,
            config.training.clip_lower,
            config.training.clip_upper
        ),
        format!(
            "  Checkpoints: every {} generator iterations into {}",
            config.training.checkpoint_interval,
            config.output.dir.display()
        ),
    ];
    lines.join("\n")
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    validate_config(&config).map_err(|e| format!("Validation failed: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        println!();
        println!("{}", format_summary(&config));
    }

    Ok(())
}
