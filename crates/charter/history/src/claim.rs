use serde::{Deserialize, Serialize};

/// Subject area of a claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimDomain {
    Economics,
    Governance,
    Medicine,
    Tech,
    Labor,
    Social,
}

/// Strength of the evidence behind a claim, `A` strongest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EvidenceGrade {
    A,
    B,
    C,
    D,
}

/// Who appended the claim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddedBy {
    System,
    Curator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// First-hand record (archive, filing, statute).
    Primary,
    /// Dataset or measurement series.
    Data,
    /// Analysis or reporting about primary material.
    Secondary,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub publisher: String,
    pub kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Source {
    pub fn new(title: impl Into<String>, publisher: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            title: title.into(),
            publisher: publisher.into(),
            kind,
            url: None,
        }
    }

    pub fn is_primary_or_data(&self) -> bool {
        matches!(self.kind, SourceKind::Primary | SourceKind::Data)
    }

    /// Publisher key used for independence checks.
    pub(crate) fn publisher_key(&self) -> String {
        self.publisher.trim().to_lowercase()
    }
}

/// A claim as submitted for appending.
///
/// `claim_id` is optional; the ledger assigns one when absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimDraft {
    #[serde(default)]
    pub claim_id: Option<String>,
    pub claim_text: String,
    pub time_range: String,
    pub geography: String,
    pub domain: ClaimDomain,
    pub sources: Vec<Source>,
    #[serde(default)]
    pub counter_sources: Vec<Source>,
    pub evidence_grade: EvidenceGrade,
    pub confidence_score: f64,
    pub controversy_score: f64,
    pub added_by: AddedBy,
    pub falsifiable_prompt: String,
    #[serde(default)]
    pub challenge_of: Option<String>,
}

/// A claim as recorded in the ledger. Never edited once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryClaim {
    pub claim_id: String,
    pub claim_text: String,
    pub time_range: String,
    pub geography: String,
    pub domain: ClaimDomain,
    pub sources: Vec<Source>,
    pub counter_sources: Vec<Source>,
    pub evidence_grade: EvidenceGrade,
    pub confidence_score: f64,
    pub controversy_score: f64,
    pub added_by: AddedBy,
    /// Logical timestamp, `h<N>`.
    pub added_at: String,
    pub falsifiable_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_of: Option<String>,
}

impl HistoryClaim {
    pub(crate) fn from_draft(draft: ClaimDraft, claim_id: String, added_at: String) -> Self {
        Self {
            claim_id,
            claim_text: draft.claim_text,
            time_range: draft.time_range,
            geography: draft.geography,
            domain: draft.domain,
            sources: draft.sources,
            counter_sources: draft.counter_sources,
            evidence_grade: draft.evidence_grade,
            confidence_score: draft.confidence_score,
            controversy_score: draft.controversy_score,
            added_by: draft.added_by,
            added_at,
            falsifiable_prompt: draft.falsifiable_prompt,
            challenge_of: draft.challenge_of,
        }
    }
}
