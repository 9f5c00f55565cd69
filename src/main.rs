//! tilegan CLI
//!
//! # Usage
//!
//! ```bash
//! # Train with defaults on a level file
//! tilegan train --data levels.json
//!
//! # Train from config with overrides
//! tilegan train run.yaml --epochs 10 --critic-lr 5e-5 --optimizer rmsprop
//!
//! # Validate config
//! tilegan validate run.yaml --detailed
//! ```

use clap::Parser;
use std::process::ExitCode;
use tilegan::cli::{run_command, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
