use thiserror::Error;

/// Reasons a claim draft is refused by the ledger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistoryError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Score out of range: {field} = {value} (expected 0.0..=1.0)")]
    ScoreOutOfRange { field: &'static str, value: f64 },

    #[error("Prescriptive language in claim text: '{0}'")]
    PrescriptiveLanguage(String),

    #[error("Claim text overlaps forbidden optimization target: '{0}'")]
    ForbiddenTarget(String),

    #[error("Insufficient sources: {0}")]
    InsufficientSources(&'static str),

    #[error("Counter sources required when controversy is {0} (> 0.3)")]
    MissingCounterSources(f64),

    #[error("Duplicate claim id: {0}")]
    DuplicateClaim(String),

    #[error("Challenge target not found: {0}")]
    UnknownChallengeTarget(String),
}

pub type HistoryResult<T> = Result<T, HistoryError>;
