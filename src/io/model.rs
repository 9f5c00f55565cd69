//! Serializable model state

use std::collections::BTreeMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::nn::Param;
use crate::{Error, Result};

/// Model metadata stored alongside the weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name/identifier (e.g. "generator")
    pub name: String,

    /// Architecture description
    pub architecture: String,

    /// Format version
    pub version: String,

    /// Custom metadata fields
    #[serde(default)]
    pub custom: BTreeMap<String, serde_json::Value>,
}

impl ModelMetadata {
    pub fn new(name: impl Into<String>, architecture: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            architecture: architecture.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            custom: BTreeMap::new(),
        }
    }
}

/// One named parameter, flattened row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterState {
    pub name: String,
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

/// Named snapshot of every parameter of a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDict {
    pub metadata: ModelMetadata,
    pub parameters: Vec<ParameterState>,
}

impl StateDict {
    /// Snapshot the given parameters
    pub fn from_params(metadata: ModelMetadata, params: &[&Param]) -> Self {
        let parameters = params
            .iter()
            .map(|p| {
                let (rows, cols) = p.shape();
                ParameterState {
                    name: p.name().to_string(),
                    shape: vec![rows, cols],
                    data: p.data().iter().copied().collect(),
                }
            })
            .collect();
        Self {
            metadata,
            parameters,
        }
    }

    /// Add custom metadata field
    pub fn with_custom(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.custom.insert(key.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParameterState> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn num_parameters(&self) -> usize {
        self.parameters.iter().map(|p| p.data.len()).sum()
    }

    /// Copy the stored values into `params`, matched by name
    ///
    /// Every parameter is checked before any is written, so a mismatch
    /// leaves the model untouched.
    pub fn apply_to(&self, params: &mut [&mut Param]) -> Result<()> {
        if params.len() != self.parameters.len() {
            return Err(Error::StateDict(format!(
                "expected {} parameters, state dict has {}",
                params.len(),
                self.parameters.len()
            )));
        }

        let mut values = Vec::with_capacity(params.len());
        for param in params.iter() {
            let stored = self.get(param.name()).ok_or_else(|| {
                Error::StateDict(format!("missing parameter '{}'", param.name()))
            })?;
            let (rows, cols) = param.shape();
            if stored.shape != [rows, cols] {
                return Err(Error::StateDict(format!(
                    "shape mismatch for '{}': model {:?}, state dict {:?}",
                    param.name(),
                    [rows, cols],
                    stored.shape
                )));
            }
            let data = Array2::from_shape_vec((rows, cols), stored.data.clone()).map_err(|e| {
                Error::StateDict(format!("corrupt data for '{}': {e}", param.name()))
            })?;
            values.push(data);
        }

        for (param, data) in params.iter_mut().zip(values) {
            param.assign(data);
        }
        Ok(())
    }
}
