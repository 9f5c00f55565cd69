//! Train command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{
    apply_overrides, load_config, train_from_config, validate_config, TrainArgs, WganConfig,
};

/// Defaults, then the YAML file if given, then CLI flags
pub fn resolve_config(args: &TrainArgs) -> Result<WganConfig, String> {
    let mut config = match &args.config {
        Some(path) => load_config(path).map_err(|e| format!("Config error: {e}"))?,
        None => WganConfig::default(),
    };
    apply_overrides(&mut config, args);
    Ok(config)
}

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    let config = resolve_config(&args)?;
    log(
        level,
        LogLevel::Normal,
        &format!("tilegan: training on {}", config.data.path.display()),
    );

    if args.dry_run {
        validate_config(&config).map_err(|e| format!("Validation failed: {e}"))?;
        log(level, LogLevel::Normal, "Dry run - config validated successfully");
        if let Ok(yaml) = serde_yaml::to_string(&config) {
            log(level, LogLevel::Verbose, &yaml);
        }
        return Ok(());
    }

    let summary = train_from_config(&config).map_err(|e| format!("Training error: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Training complete: {} generator iterations over {} epochs, {} checkpoints in {}",
            summary.generator_iteration,
            summary.epochs,
            summary.checkpoints.len(),
            config.output.dir.display()
        ),
    );
    Ok(())
}
