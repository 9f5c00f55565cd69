//! YAML configuration loading

use std::fs;
use std::path::Path;

use super::schema::WganConfig;
use crate::error::{Error, Result};

/// Read a YAML configuration file
///
/// Missing sections and fields take their defaults. The result is not
/// validated; call `validate_config` once CLI overrides are applied.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<WganConfig> {
    let path = config_path.as_ref();
    let yaml_content = fs::read_to_string(path).map_err(|e| {
        Error::Configuration(format!(
            "Failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    parse_config(&yaml_content)
}

/// Parse a YAML configuration document
pub fn parse_config(yaml: &str) -> Result<WganConfig> {
    serde_yaml::from_str(yaml)
        .map_err(|e| Error::Configuration(format!("Failed to parse YAML config: {e}")))
}
