//! Optimizers for training the generator and critic

mod adam;
mod optimizer;
mod rmsprop;

use std::fmt;
use std::str::FromStr;

pub use adam::Adam;
pub use optimizer::Optimizer;
pub use rmsprop::RmsProp;

use crate::Error;

/// Which optimizer drives both networks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizerKind {
    Adam,
    RmsProp,
}

impl OptimizerKind {
    pub const NAMES: [&'static str; 2] = ["adam", "rmsprop"];

    /// Build an optimizer; `beta1` is ignored by RMSprop
    pub fn build(self, lr: f32, beta1: f32) -> Box<dyn Optimizer> {
        match self {
            OptimizerKind::Adam => Box::new(Adam::with_beta1(lr, beta1)),
            OptimizerKind::RmsProp => Box::new(RmsProp::default_params(lr)),
        }
    }
}

impl FromStr for OptimizerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "adam" => Ok(OptimizerKind::Adam),
            "rmsprop" => Ok(OptimizerKind::RmsProp),
            other => Err(Error::Configuration(format!(
                "Invalid optimizer: {other} (must be one of: {})",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizerKind::Adam => write!(f, "adam"),
            OptimizerKind::RmsProp => write!(f, "rmsprop"),
        }
    }
}
