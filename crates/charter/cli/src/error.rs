//! CLI error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input file could not be interpreted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Whether the engine could not evaluate because of the input itself.
    /// These errors put the caller into safe mode instead of aborting.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, CliError::Config(_))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_errors_are_not_input_errors() {
        assert!(!CliError::Config("bad".into()).is_input_error());
        assert!(CliError::InvalidInput("bad".into()).is_input_error());
    }
}
