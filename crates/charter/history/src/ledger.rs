use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::claim::{ClaimDraft, HistoryClaim};
use crate::error::{HistoryError, HistoryResult};
use crate::validate;

/// Append-only ledger of descriptive history claims.
///
/// Claims are validated in full before anything is written; a rejected
/// draft leaves the ledger untouched. There is no edit or delete. A claim is
/// revised by appending a challenge that points at it via `challenge_of`.
#[derive(Debug, Default, Clone, Serialize)]
pub struct HistoryLedger {
    claims: Vec<HistoryClaim>,
    clock: u64,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a draft, returning the recorded claim.
    pub fn append(&mut self, draft: ClaimDraft) -> HistoryResult<&HistoryClaim> {
        if let Err(err) = self.validate(&draft) {
            warn!(error = %err, "History claim rejected");
            return Err(err);
        }

        self.clock += 1;
        let claim_id = explicit_id(&draft)
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let claim = HistoryClaim::from_draft(draft, claim_id, format!("h{}", self.clock));

        info!(
            claim_id = %claim.claim_id,
            added_at = %claim.added_at,
            challenge = claim.challenge_of.is_some(),
            "History claim appended"
        );
        self.claims.push(claim);
        Ok(&self.claims[self.claims.len() - 1])
    }

    fn validate(&self, draft: &ClaimDraft) -> HistoryResult<()> {
        validate::check_content(draft)?;

        if let Some(id) = explicit_id(draft) {
            if self.get(id).is_some() {
                return Err(HistoryError::DuplicateClaim(id.to_string()));
            }
        }
        if let Some(target) = &draft.challenge_of {
            if self.get(target).is_none() {
                return Err(HistoryError::UnknownChallengeTarget(target.clone()));
            }
        }
        Ok(())
    }

    /// All claims in append order.
    pub fn claims(&self) -> &[HistoryClaim] {
        &self.claims
    }

    pub fn get(&self, claim_id: &str) -> Option<&HistoryClaim> {
        self.claims.iter().find(|c| c.claim_id == claim_id)
    }

    /// Claims that challenge `claim_id`, in append order.
    pub fn challenges_of(&self, claim_id: &str) -> Vec<&HistoryClaim> {
        self.claims
            .iter()
            .filter(|c| c.challenge_of.as_deref() == Some(claim_id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Logical clock; equals the number of accepted appends.
    pub fn clock(&self) -> u64 {
        self.clock
    }
}

/// The caller-supplied id, if it is non-blank.
fn explicit_id(draft: &ClaimDraft) -> Option<&str> {
    draft
        .claim_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::{AddedBy, ClaimDomain, EvidenceGrade, Source, SourceKind};

    fn draft(text: &str) -> ClaimDraft {
        ClaimDraft {
            claim_id: None,
            claim_text: text.to_string(),
            time_range: "1870-1914".into(),
            geography: "Western Europe".into(),
            domain: ClaimDomain::Economics,
            sources: vec![
                Source::new("Trade returns", "Board of Trade", SourceKind::Primary),
                Source::new("The Gold Standard", "Economic History Review", SourceKind::Secondary),
            ],
            counter_sources: vec![],
            evidence_grade: EvidenceGrade::B,
            confidence_score: 0.7,
            controversy_score: 0.1,
            added_by: AddedBy::Curator,
            falsifiable_prompt: "Did trade volume fall after 1914?".into(),
            challenge_of: None,
        }
    }

    #[test]
    fn test_append_assigns_id_and_logical_time() {
        let mut ledger = HistoryLedger::new();
        let claim = ledger
            .append(draft("Trade volume grew under the gold standard"))
            .unwrap();

        assert_eq!(claim.added_at, "h1");
        assert!(Uuid::parse_str(&claim.claim_id).is_ok());
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.clock(), 1);
    }

    #[test]
    fn test_prescriptive_claim_rejected_without_mutation() {
        let mut ledger = HistoryLedger::new();
        ledger.append(draft("Grain prices fell")).unwrap();

        let err = ledger
            .append(draft("You should optimize pricing"))
            .unwrap_err();
        assert_eq!(err, HistoryError::PrescriptiveLanguage("should".into()));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.clock(), 1);
    }

    #[test]
    fn test_validation_order() {
        let mut d = draft("Leaders must centralize power");
        d.geography = " ".into();
        d.confidence_score = 2.0;
        let mut ledger = HistoryLedger::new();

        assert_eq!(
            ledger.append(d.clone()).unwrap_err(),
            HistoryError::MissingField("geography")
        );
        d.geography = "Rome".into();
        assert!(matches!(
            ledger.append(d.clone()).unwrap_err(),
            HistoryError::ScoreOutOfRange { field: "confidence_score", .. }
        ));
        d.confidence_score = 0.5;
        assert_eq!(
            ledger.append(d.clone()).unwrap_err(),
            HistoryError::PrescriptiveLanguage("must".into())
        );
        d.claim_text = "Emperors sought to centralize power".into();
        assert_eq!(
            ledger.append(d).unwrap_err(),
            HistoryError::ForbiddenTarget("centralize power".into())
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_blank_claim_id_gets_generated_id() {
        let mut ledger = HistoryLedger::new();
        for blank in ["", "   "] {
            let mut d = draft("Canal tolls fell");
            d.claim_id = Some(blank.into());
            let claim = ledger.append(d).unwrap();
            assert!(Uuid::parse_str(&claim.claim_id).is_ok());
        }
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_hyphenated_forbidden_target_rejected() {
        let mut ledger = HistoryLedger::new();
        let err = ledger
            .append(draft("Engagement-driven feeds grew after 2012"))
            .unwrap_err();
        assert_eq!(err, HistoryError::ForbiddenTarget("engagement".into()));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_nan_score_rejected() {
        let mut d = draft("Wages rose");
        d.controversy_score = f64::NAN;
        assert!(matches!(
            HistoryLedger::new().append(d),
            Err(HistoryError::ScoreOutOfRange { field: "controversy_score", .. })
        ));
    }

    #[test]
    fn test_controversial_claim_needs_counter_sources() {
        let mut d = draft("Enclosure reduced rural wages");
        d.controversy_score = 0.6;
        let mut ledger = HistoryLedger::new();
        assert_eq!(
            ledger.append(d.clone()).unwrap_err(),
            HistoryError::MissingCounterSources(0.6)
        );

        d.counter_sources = vec![Source::new("Revisionist view", "Agrarian Review", SourceKind::Secondary)];
        assert!(ledger.append(d).is_ok());
    }

    #[test]
    fn test_duplicate_explicit_id_rejected() {
        let mut ledger = HistoryLedger::new();
        let mut d = draft("Canal freight rates halved");
        d.claim_id = Some("canal-1".into());
        ledger.append(d.clone()).unwrap();

        assert_eq!(
            ledger.append(d).unwrap_err(),
            HistoryError::DuplicateClaim("canal-1".into())
        );
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_challenges_link_to_existing_claims() {
        let mut ledger = HistoryLedger::new();
        let mut original = draft("Railways lowered grain prices");
        original.claim_id = Some("rail-1".into());
        ledger.append(original).unwrap();

        let mut orphan = draft("Grain prices were flat");
        orphan.challenge_of = Some("missing".into());
        assert_eq!(
            ledger.append(orphan.clone()).unwrap_err(),
            HistoryError::UnknownChallengeTarget("missing".into())
        );

        orphan.challenge_of = Some("rail-1".into());
        ledger.append(orphan).unwrap();

        let challenges = ledger.challenges_of("rail-1");
        assert_eq!(challenges.len(), 1);
        assert_eq!(challenges[0].added_at, "h2");
        assert_eq!(ledger.get("rail-1").unwrap().claim_text, "Railways lowered grain prices");
    }
}
