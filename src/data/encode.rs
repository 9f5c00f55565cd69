//! One-hot encoding onto a padded square canvas
//!
//! An example of extent `(rows, cols)` is written into the top-left corner
//! of a `canvas x canvas` grid; every other cell holds the empty tile. The
//! flattened layout is `[class][row][col]`, so one encoded example is a row
//! of `tile_classes * canvas * canvas` values.

use ndarray::{Array2, ArrayView1, ArrayViewMut1};

use super::levels::{LevelSet, TileGrid};
use crate::{Error, Result};

/// Tile vocabulary and canvas geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEncoding {
    tile_classes: usize,
    canvas: usize,
    empty_tile: usize,
}

impl TileEncoding {
    pub fn new(tile_classes: usize, canvas: usize, empty_tile: usize) -> Result<Self> {
        if tile_classes == 0 || canvas == 0 {
            return Err(Error::Configuration(format!(
                "tile classes ({tile_classes}) and canvas ({canvas}) must be > 0"
            )));
        }
        if empty_tile >= tile_classes {
            return Err(Error::Configuration(format!(
                "empty tile {empty_tile} is not one of {tile_classes} classes"
            )));
        }
        Ok(Self {
            tile_classes,
            canvas,
            empty_tile,
        })
    }

    pub fn tile_classes(&self) -> usize {
        self.tile_classes
    }

    pub fn canvas(&self) -> usize {
        self.canvas
    }

    pub fn empty_tile(&self) -> usize {
        self.empty_tile
    }

    /// Length of one encoded example
    pub fn features(&self) -> usize {
        self.tile_classes * self.canvas * self.canvas
    }

    fn index(&self, class: usize, row: usize, col: usize) -> usize {
        (class * self.canvas + row) * self.canvas + col
    }

    fn check(&self, grid: &TileGrid) -> Result<()> {
        let (rows, cols) = grid.dim();
        if rows > self.canvas || cols > self.canvas {
            return Err(Error::DataLoad(format!(
                "example extent ({rows}, {cols}) exceeds the {0}x{0} canvas",
                self.canvas
            )));
        }
        if let Some(&tile) = grid.iter().find(|&&t| t >= self.tile_classes) {
            return Err(Error::DataLoad(format!(
                "tile id {tile} is outside the {} tile classes",
                self.tile_classes
            )));
        }
        Ok(())
    }

    fn encode_into(&self, grid: &TileGrid, mut out: ArrayViewMut1<'_, f32>) {
        out.fill(0.0);
        for row in 0..self.canvas {
            for col in 0..self.canvas {
                let class = grid.get((row, col)).copied().unwrap_or(self.empty_tile);
                out[self.index(class, row, col)] = 1.0;
            }
        }
    }

    /// Encode one example as a `(1, features)` row
    pub fn encode(&self, grid: &TileGrid) -> Result<Array2<f32>> {
        self.check(grid)?;
        let mut out = Array2::zeros((1, self.features()));
        self.encode_into(grid, out.row_mut(0));
        Ok(out)
    }

    /// Encode every example, one row each
    pub fn encode_all(&self, levels: &LevelSet) -> Result<Array2<f32>> {
        let mut out = Array2::zeros((levels.len(), self.features()));
        for (grid, row) in levels.levels().iter().zip(out.rows_mut()) {
            self.check(grid)?;
            self.encode_into(grid, row);
        }
        Ok(out)
    }

    /// Per-cell arg-max over classes; ties go to the lowest class
    pub fn decode(&self, encoded: ArrayView1<'_, f32>) -> TileGrid {
        Array2::from_shape_fn((self.canvas, self.canvas), |(row, col)| {
            let mut best = 0;
            let mut best_value = f32::NEG_INFINITY;
            for class in 0..self.tile_classes {
                let value = encoded[self.index(class, row, col)];
                if value > best_value {
                    best = class;
                    best_value = value;
                }
            }
            best
        })
    }

    pub fn decode_batch(&self, batch: &Array2<f32>) -> Vec<TileGrid> {
        batch.rows().into_iter().map(|row| self.decode(row)).collect()
    }
}
