//! Config loading and output writing

use std::fs;
use std::io;
use std::path::Path;

use mixplan_core::{Parameters, SweepSpec};
use serde::de::DeserializeOwned;

/// Failure to read or parse a YAML config file
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "IO error: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    serde_saphyr::from_str(&content)
        .map_err(|e| ConfigError::Parse(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Load a single deployment from YAML.
///
/// Fields are the snake_case `Parameters` names; `noise_signal` may be omitted.
/// The values are not validated here, evaluation does that.
pub fn load_parameters(path: &Path) -> Result<Parameters, ConfigError> {
    load_yaml(path)
}

/// Load a sweep (a `base` deployment plus `dimensions`) from YAML
pub fn load_sweep(path: &Path) -> Result<SweepSpec, ConfigError> {
    load_yaml(path)
}

/// Serialize a sweep back to YAML, e.g. to seed a config from a preset
pub fn sweep_to_yaml(spec: &SweepSpec) -> Result<String, ConfigError> {
    serde_saphyr::to_string(spec)
        .map_err(|e| ConfigError::Serialize(format!("Failed to serialize sweep: {}", e)))
}

/// Write content to a file atomically using write-then-rename.
///
/// The content goes to a sibling `.tmp` file first, so an interrupted
/// write never leaves a truncated report at `path`.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let mut temp_name = path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = Path::new(&temp_name);

    fs::write(temp_path, content)?;
    fs::rename(temp_path, path)?;

    Ok(())
}
