//! # charter-history
//!
//! An append-only ledger of descriptive history claims, and the gate that
//! decides whether a caller may consult them.
//!
//! Claims describe what happened, where and when, backed by a primary or
//! data source and an independent secondary one. A claim that prescribes
//! ("should", "must", ...) or speaks to a prohibited optimization target is
//! refused. Claims are never edited: disagreement is recorded by appending a
//! challenge that references the original.
//!
//! History is context only. [`HistoryLedger::evaluate_usage`] denies any
//! request that lacks a declared intent or wants claims for justification,
//! ranking or prediction.

pub mod claim;
pub mod error;
pub mod ledger;
pub mod usage;
pub mod validate;

pub use claim::{AddedBy, ClaimDomain, ClaimDraft, EvidenceGrade, HistoryClaim, Source, SourceKind};
pub use error::{HistoryError, HistoryResult};
pub use ledger::HistoryLedger;
pub use usage::{
    HistoryUsageDecision, HistoryUsagePurpose, HistoryUsageRequest, HISTORY_CONTEXT_ONLY,
    HISTORY_INTENT_REQUIRED, HISTORY_UNKNOWN_CLAIM,
};
pub use validate::{
    find_forbidden_target, find_prescriptive_term, forbidden_targets, COUNTER_SOURCE_THRESHOLD,
};
