//! Context structure for executing release phases with all required dependencies.

use crate::cli::OutputManager;
use crate::config::ReleaseTarget;

/// Context for executing release phases with all required dependencies
pub struct ReleasePhaseContext<'a, A> {
    /// GitHub API for the target repository
    pub api: &'a A,
    /// What is being released
    pub target: &'a ReleaseTarget,
    /// Progress and annotation output
    pub output: &'a OutputManager,
}
