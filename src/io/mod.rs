//! Model state persistence and checkpoint output

mod checkpoint;
mod load;
mod model;
mod save;

pub use checkpoint::{Checkpoint, CheckpointWriter, FileCheckpointWriter};
pub use load::load_state_dict;
pub use model::{ModelMetadata, ParameterState, StateDict};
pub use save::{save_png, save_state_dict};
