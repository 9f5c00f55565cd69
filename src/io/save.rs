//! Writing state dicts and sample images

use std::fs;
use std::path::Path;

use image::{ImageFormat, RgbaImage};

use super::model::StateDict;
use crate::{Error, Result};

/// Save a state dict as pretty-printed JSON
pub fn save_state_dict(state: &StateDict, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(state).map_err(|e| Error::checkpoint_write(path, e))?;
    fs::write(path, json).map_err(|e| Error::checkpoint_write(path, e))
}

/// Save an RGBA image as PNG
pub fn save_png(image: &RgbaImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| Error::checkpoint_write(path, e))
}
