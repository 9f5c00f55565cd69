//! Adversarial training loop
//!
//! `WganTrainer` alternates critic phases and generator steps:
//! - Critic phase: a scheduled number of clipped critic updates, each
//!   consuming one real batch
//! - Generator step: one update through the frozen critic
//! - Progress record and optional checkpoint after every generator step
//!
//! # Example
//!
//! ```no_run
//! use tilegan::data::{DatasetBuffer, TileEncoding};
//! use tilegan::gan::{CriticConfig, GeneratorConfig, MlpCritic, MlpGenerator};
//! use tilegan::train::{TrainerConfig, WganTrainer};
//! # fn main() -> tilegan::Result<()> {
//! # let examples = ndarray::Array2::zeros((64, 6 * 32 * 32));
//! let encoding = TileEncoding::new(6, 32, 2)?;
//! let dataset = DatasetBuffer::new(examples, 32)?;
//! let generator = MlpGenerator::with_seed(GeneratorConfig::default(), 1)?;
//! let critic = MlpCritic::with_seed(CriticConfig::default(), 2)?;
//!
//! let mut trainer = WganTrainer::new(
//!     generator,
//!     critic,
//!     dataset,
//!     encoding,
//!     TrainerConfig::default().with_epochs(5),
//! )?;
//! let summary = trainer.train()?;
//! println!("finished at generator iteration {}", summary.generator_iteration);
//! # Ok(())
//! # }
//! ```

mod core;
mod epoch;
mod step;
mod train_loop;

pub use self::core::WganTrainer;
pub use step::CriticStep;
