//! Level file loading
//!
//! A level file is a JSON array of examples; each example is a 2-D array of
//! tile ids with the same extent as every other example.

use std::fs;
use std::path::Path;

use ndarray::Array2;

use crate::{Error, Result};

/// Grid of categorical tile ids, `(rows, cols)`
pub type TileGrid = Array2<usize>;

/// Every example of a level file, all of one extent
#[derive(Debug, Clone, PartialEq)]
pub struct LevelSet {
    levels: Vec<TileGrid>,
}

impl LevelSet {
    /// Build from grids, rejecting an empty set or mixed extents
    pub fn new(levels: Vec<TileGrid>) -> Result<Self> {
        let first = levels
            .first()
            .ok_or_else(|| Error::DataLoad("level file contains no examples".to_string()))?
            .dim();
        if let Some((index, grid)) = levels.iter().enumerate().find(|(_, g)| g.dim() != first) {
            return Err(Error::DataLoad(format!(
                "example {index} has extent {:?}, expected {first:?}",
                grid.dim()
            )));
        }
        Ok(Self { levels })
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// `(rows, cols)` shared by every example
    pub fn extent(&self) -> (usize, usize) {
        self.levels.first().map_or((0, 0), |g| g.dim())
    }

    /// Largest tile id present
    pub fn max_tile(&self) -> usize {
        self.levels
            .iter()
            .flat_map(|g| g.iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn levels(&self) -> &[TileGrid] {
        &self.levels
    }
}

/// Parse a level file's JSON text
pub fn parse_levels(json: &str) -> Result<LevelSet> {
    let raw: Vec<Vec<Vec<usize>>> = serde_json::from_str(json)
        .map_err(|e| Error::DataLoad(format!("malformed level JSON: {e}")))?;

    let mut levels = Vec::with_capacity(raw.len());
    for (index, example) in raw.into_iter().enumerate() {
        let rows = example.len();
        let cols = example.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(Error::DataLoad(format!("example {index} is empty")));
        }
        if let Some(r) = example.iter().position(|row| row.len() != cols) {
            return Err(Error::DataLoad(format!(
                "example {index} is ragged: row {r} has {} tiles, expected {cols}",
                example[r].len()
            )));
        }
        let flat: Vec<usize> = example.into_iter().flatten().collect();
        let grid = Array2::from_shape_vec((rows, cols), flat)
            .map_err(|e| Error::DataLoad(format!("example {index}: {e}")))?;
        levels.push(grid);
    }
    LevelSet::new(levels)
}

/// Read and parse a level file
pub fn load_levels(path: impl AsRef<Path>) -> Result<LevelSet> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::DataLoad(format!("cannot read {}: {e}", path.display())))?;
    let levels = parse_levels(&text)?;
    tracing::debug!(
        path = %path.display(),
        examples = levels.len(),
        extent = ?levels.extent(),
        "loaded level file"
    );
    Ok(levels)
}
