use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OutcomeError;

/// Final disposition of a gated action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalOutcome {
    Executed,
    Halted,
    Deferred,
}

impl TerminalOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalOutcome::Executed => "executed",
            TerminalOutcome::Halted => "halted",
            TerminalOutcome::Deferred => "deferred",
        }
    }
}

impl fmt::Display for TerminalOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminalOutcome {
    type Err = OutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        migrate_legacy_outcome(s)
    }
}

/// Map an outcome string of either generation onto [`TerminalOutcome`].
///
/// Older records used `DONE` / `BLOCKED` / `RETRY`. Both the legacy and the
/// current names are accepted, case-insensitively. Call this only where
/// old-shaped records may still arrive; evaluation code produces
/// [`TerminalOutcome`] directly.
pub fn migrate_legacy_outcome(raw: &str) -> Result<TerminalOutcome, OutcomeError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "done" | "executed" => Ok(TerminalOutcome::Executed),
        "blocked" | "halted" => Ok(TerminalOutcome::Halted),
        "retry" | "deferred" => Ok(TerminalOutcome::Deferred),
        _ => Err(OutcomeError::Unknown(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_names_migrate() {
        assert_eq!(migrate_legacy_outcome("DONE").unwrap(), TerminalOutcome::Executed);
        assert_eq!(migrate_legacy_outcome("BLOCKED").unwrap(), TerminalOutcome::Halted);
        assert_eq!(migrate_legacy_outcome("RETRY").unwrap(), TerminalOutcome::Deferred);
    }

    #[test]
    fn current_names_pass_through() {
        for outcome in [
            TerminalOutcome::Executed,
            TerminalOutcome::Halted,
            TerminalOutcome::Deferred,
        ] {
            assert_eq!(migrate_legacy_outcome(outcome.as_str()).unwrap(), outcome);
        }
        assert_eq!(" Halted ".parse::<TerminalOutcome>().unwrap(), TerminalOutcome::Halted);
    }

    #[test]
    fn unknown_outcome_is_rejected() {
        let err = migrate_legacy_outcome("CANCELLED").unwrap_err();
        assert!(err.to_string().contains("CANCELLED"));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&TerminalOutcome::Halted).unwrap();
        assert_eq!(json, "\"halted\"");
    }
}
