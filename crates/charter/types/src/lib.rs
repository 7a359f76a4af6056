//! # charter-types
//!
//! Shared vocabulary for the Charter policy layer.
//!
//! ## Static registries
//!
//! - [`CONSTITUTION`] - the system purpose and its prohibited optimization
//!   targets (non-goals)
//! - [`INVARIANT_REGISTRY`] - the four permanent invariants and their
//!   enforcement / safe-failure declarations
//!
//! Both are `static` data: loaded with the binary, never mutated.
//!
//! ## Values
//!
//! - [`FeatureInput`] - a proposed change as supplied by the caller
//! - [`PolicyMessage`] / [`PolicyResult`] - violations and warnings
//! - [`TerminalOutcome`] - executed / halted / deferred, with
//!   [`migrate_legacy_outcome`] for older record shapes
//!
//! [`normalize_target`] is the single text normalization applied on both
//! sides of every optimization-target comparison.

pub mod constitution;
pub mod error;
pub mod input;
pub mod invariant;
pub mod message;
pub mod normalize;
pub mod outcome;

pub use constitution::{Constitution, CONSTITUTION};
pub use error::OutcomeError;
pub use input::{FeatureInput, UNKNOWN_FEATURE};
pub use invariant::{
    find_invariant, InvariantDefinition, AUTHORITY_DECAYS_WITHOUT_CONTRIBUTION, INTENT_BEFORE_ACTION,
    INVARIANT_REGISTRY, KNOWLEDGE_OVER_POSITION, NO_CENTRAL_CONTROL,
};
pub use message::{PolicyMessage, PolicyResult};
pub use normalize::normalize_target;
pub use outcome::{migrate_legacy_outcome, TerminalOutcome};
