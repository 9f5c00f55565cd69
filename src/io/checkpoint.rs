//! Periodic checkpoint output
//!
//! A checkpoint bundles the generator's weights and the grids decoded from
//! the fixed visualization noise. Writers decide where they go; the trainer
//! only decides when.

use std::fs;
use std::path::{Path, PathBuf};

use super::model::StateDict;
use super::save::{save_png, save_state_dict};
use crate::data::TileGrid;
use crate::render::TileRenderer;
use crate::{Error, Result};

/// Everything produced at one checkpoint trigger
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint<'a> {
    /// Generator iteration that fired the trigger
    pub generator_iteration: usize,
    /// Problem identifier used in file names
    pub problem: usize,
    /// Latent size used in file names
    pub latent_size: usize,
    /// Generator weights at this iteration
    pub generator_state: &'a StateDict,
    /// Arg-max decoded samples from the fixed noise
    pub samples: &'a [TileGrid],
}

/// Destination for checkpoints
pub trait CheckpointWriter {
    /// Persist a checkpoint, returning the paths written
    fn write(&mut self, checkpoint: &Checkpoint<'_>) -> Result<Vec<PathBuf>>;
}

/// Writes `model_epoch_{g}_{problem}_{latent}.json` and
/// `lode_runner_fakes{g}.png` into one directory
#[derive(Debug, Clone)]
pub struct FileCheckpointWriter {
    dir: PathBuf,
    renderer: TileRenderer,
}

impl FileCheckpointWriter {
    /// Use `dir`, creating it if needed
    pub fn create(dir: impl Into<PathBuf>, renderer: TileRenderer) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            Error::Configuration(format!(
                "cannot create output directory {}: {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir, renderer })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn model_path(&self, generator_iteration: usize, problem: usize, latent_size: usize) -> PathBuf {
        self.dir.join(format!(
            "model_epoch_{generator_iteration}_{problem}_{latent_size}.json"
        ))
    }

    pub fn image_path(&self, generator_iteration: usize) -> PathBuf {
        self.dir
            .join(format!("lode_runner_fakes{generator_iteration}.png"))
    }
}

impl CheckpointWriter for FileCheckpointWriter {
    fn write(&mut self, checkpoint: &Checkpoint<'_>) -> Result<Vec<PathBuf>> {
        let model_path = self.model_path(
            checkpoint.generator_iteration,
            checkpoint.problem,
            checkpoint.latent_size,
        );
        save_state_dict(checkpoint.generator_state, &model_path)?;

        let image_path = self.image_path(checkpoint.generator_iteration);
        save_png(&self.renderer.render(checkpoint.samples), &image_path)?;

        tracing::info!(
            generator_iteration = checkpoint.generator_iteration,
            model = %model_path.display(),
            image = %image_path.display(),
            "checkpoint written"
        );
        Ok(vec![model_path, image_path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{load_state_dict, ModelMetadata};
    use ndarray::Array2;
    use tempfile::TempDir;

    #[test]
    fn test_file_names() {
        let dir = TempDir::new().unwrap();
        let writer = FileCheckpointWriter::create(dir.path(), TileRenderer::new(6, 1)).unwrap();
        assert_eq!(
            writer.model_path(50, 0, 10),
            dir.path().join("model_epoch_50_0_10.json")
        );
        assert_eq!(writer.image_path(150), dir.path().join("lode_runner_fakes150.png"));
    }

    #[test]
    fn test_create_makes_nested_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("GAN_output").join("run1");
        FileCheckpointWriter::create(&nested, TileRenderer::new(6, 1)).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_write_both_files() {
        let dir = TempDir::new().unwrap();
        let mut writer = FileCheckpointWriter::create(dir.path(), TileRenderer::new(6, 1)).unwrap();
        let state = StateDict::from_params(ModelMetadata::new("generator", "mlp"), &[]);
        let samples = vec![Array2::from_elem((4, 4), 2usize); 4];

        let written = writer
            .write(&Checkpoint {
                generator_iteration: 100,
                problem: 3,
                latent_size: 10,
                generator_state: &state,
                samples: &samples,
            })
            .unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(load_state_dict(&written[0]).unwrap(), state);
        let image = image::open(&written[1]).unwrap();
        assert_eq!((image.width(), image.height()), (8, 8));
    }

    #[test]
    fn test_unwritable_directory_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = FileCheckpointWriter::create(blocker.join("sub"), TileRenderer::new(6, 1)).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
