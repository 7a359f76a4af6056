//! # charter-report
//!
//! Report Builder and Maintenance Preflight.
//!
//! - [`build_maintenance_report`] - runs the policy engine, the invariant
//!   evaluator and the drift score, and assembles one immutable
//!   [`MaintenanceReport`]
//! - [`evaluate_maintenance_preflight`] - the single PASS/FAIL gate a caller
//!   runs before letting a change proceed; a FAIL always means safe mode,
//!   human intervention and a `halted` outcome
//! - [`get_safe_mode_fallback`] - the fixed degraded-mode descriptor used
//!   when the engine cannot evaluate at all
//! - [`MaintenanceBot`] - preflight, report and fallback in one call
//!
//! Nothing here performs I/O. Persistence, scheduling and retries belong to
//! the caller.

pub mod bot;
pub mod preflight;
pub mod report;
pub mod safe_mode;

pub use bot::{
    build_maintenance_report, evaluate_maintenance_preflight, MaintenanceBot, MaintenanceRun,
};
pub use preflight::{PreflightResult, PreflightStatus, FEATURE_NAME_REQUIRED};
pub use report::{
    MaintenanceReport, ReportInput, FORBIDDEN_TARGET_HIT, NO_DRIFT_RECOMMENDATION, REPORT_VERSION,
};
pub use safe_mode::{get_safe_mode_fallback, OperatingMode, SafeModeFallback};
