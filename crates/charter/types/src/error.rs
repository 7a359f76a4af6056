use thiserror::Error;

/// Errors from outcome migration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutcomeError {
    #[error("unknown outcome: {0}")]
    Unknown(String),
}
