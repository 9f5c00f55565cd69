//! Tiling decoded grids into one composite image

use image::{Rgba, RgbaImage};

use super::palette::tile_color;
use crate::data::TileGrid;

/// Arrangement of `n` grids: `columns = floor(sqrt(n))`, `rows = ceil(n / columns)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub rows: usize,
}

pub fn grid_layout(n: usize) -> GridLayout {
    if n == 0 {
        return GridLayout {
            columns: 0,
            rows: 0,
        };
    }
    let mut columns = (n as f64).sqrt() as usize;
    // Float sqrt can land one off for large n
    while columns * columns > n {
        columns -= 1;
    }
    while (columns + 1) * (columns + 1) <= n {
        columns += 1;
    }
    GridLayout {
        columns,
        rows: n.div_ceil(columns),
    }
}

/// Renders class grids with one colour per tile class
#[derive(Debug, Clone, Copy)]
pub struct TileRenderer {
    tile_classes: usize,
    tile_pixels: u32,
}

impl TileRenderer {
    pub fn new(tile_classes: usize, tile_pixels: u32) -> Self {
        Self {
            tile_classes,
            tile_pixels: tile_pixels.max(1),
        }
    }

    /// Composite image of all grids; unused slots stay transparent black
    ///
    /// All grids are assumed to share the extent of the first one.
    pub fn render(&self, grids: &[TileGrid]) -> RgbaImage {
        let layout = grid_layout(grids.len());
        let (grid_rows, grid_cols) = grids.first().map_or((0, 0), |g| g.dim());
        let px = self.tile_pixels;
        let width = (layout.columns * grid_cols) as u32 * px;
        let height = (layout.rows * grid_rows) as u32 * px;

        let mut image = RgbaImage::new(width, height);
        for (index, grid) in grids.iter().enumerate() {
            let origin_x = (index % layout.columns.max(1) * grid_cols) as u32 * px;
            let origin_y = (index / layout.columns.max(1) * grid_rows) as u32 * px;
            for ((row, col), &class) in grid.indexed_iter() {
                if row >= grid_rows || col >= grid_cols {
                    continue;
                }
                let colour = Rgba(tile_color(class, self.tile_classes));
                for dy in 0..px {
                    for dx in 0..px {
                        image.put_pixel(
                            origin_x + col as u32 * px + dx,
                            origin_y + row as u32 * px + dy,
                            colour,
                        );
                    }
                }
            }
        }
        image
    }
}
