//! Reading state dicts

use std::fs;
use std::path::Path;

use super::model::StateDict;
use crate::{Error, Result};

/// Load a JSON state dict written by `save_state_dict`
pub fn load_state_dict(path: impl AsRef<Path>) -> Result<StateDict> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::StateDict(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| Error::StateDict(format!("failed to parse {}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{save_state_dict, ModelMetadata};
    use crate::nn::Param;
    use ndarray::array;
    use tempfile::TempDir;

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("critic.json");
        let w = Param::new("w", array![[0.25, -0.75]]);
        let state = StateDict::from_params(ModelMetadata::new("critic", "mlp"), &[&w]);

        save_state_dict(&state, &path).unwrap();
        assert_eq!(load_state_dict(&path).unwrap(), state);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_state_dict("/nonexistent/weights.json").unwrap_err();
        assert!(matches!(err, Error::StateDict(_)));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_state_dict(&path), Err(Error::StateDict(_))));
    }
}
