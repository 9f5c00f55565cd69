//! Level data: loading, one-hot encoding and batching

mod buffer;
mod encode;
mod levels;

pub use buffer::DatasetBuffer;
pub use encode::TileEncoding;
pub use levels::{load_levels, parse_levels, LevelSet, TileGrid};
