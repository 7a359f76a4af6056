//! Input file loading

use crate::error::{CliError, CliResult};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Read and parse an input file. `.yaml`/`.yml` files are parsed as YAML,
/// everything else as JSON.
pub fn read_input<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CliError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "Input loaded");

    if is_yaml(path) {
        Ok(serde_yaml::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
