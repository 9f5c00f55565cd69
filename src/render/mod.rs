//! Sample image rendering

mod composite;
mod palette;

pub use composite::{grid_layout, GridLayout, TileRenderer};
pub use palette::{rainbow, tile_color};
