//! CLI configuration

use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use charter_types::FeatureInput;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI configuration, read from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CliConfig {
    /// Tracing filter used when neither `RUST_LOG` nor `--verbose` is set
    pub log_filter: Option<String>,

    /// Default output format
    pub output: Option<OutputFormat>,

    /// Force `mockMode` on every evaluated feature
    pub mock_mode: bool,

    /// Force `allowIntentlessInMock` on every evaluated feature
    pub allow_intentless_in_mock: bool,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("charter").join("config.toml"))
    }

    /// Apply forced flags to a feature. Flags only ever switch on.
    pub fn apply(&self, feature: &mut FeatureInput) {
        if self.mock_mode {
            feature.mock_mode = true;
        }
        if self.allow_intentless_in_mock {
            feature.allow_intentless_in_mock = true;
        }
    }
}
