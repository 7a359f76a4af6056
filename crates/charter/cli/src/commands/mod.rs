//! Command implementations

pub mod constitution;
pub mod evaluate;
pub mod history;

use crate::config::CliConfig;
use crate::output::OutputFormat;

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub config: CliConfig,
    pub format: OutputFormat,
}

/// Process exit code a command finished with.
pub type ExitCode = i32;

pub const EXIT_OK: ExitCode = 0;
/// Preflight failed or a run halted.
pub const EXIT_GATE_FAILED: ExitCode = 2;
/// Input could not be evaluated; safe mode.
pub const EXIT_SAFE_MODE: ExitCode = 3;
