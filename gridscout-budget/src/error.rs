//! Errors raised while restoring a persisted allocator state.

use gridscout_core::Factor;
use thiserror::Error;

/// A persisted [`SkillBudget`](crate::SkillBudget) violated an invariant.
///
/// Restoration is all-or-nothing: a state that fails any check is rejected
/// rather than repaired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetStateError {
    /// A level exceeded the percentile scale.
    #[error("{side} {factor} level {value} exceeds 100")]
    LevelOutOfRange {
        /// Which half of the state held the value (`current` or `target`).
        side: &'static str,
        /// Affected factor.
        factor: Factor,
        /// Rejected level.
        value: u8,
    },
    /// A target sat below its current level.
    #[error("target {factor} level {target} is below the current level {current}")]
    TargetBelowCurrent {
        /// Affected factor.
        factor: Factor,
        /// Current level.
        current: u8,
        /// Rejected target.
        target: u8,
    },
    /// The targets spent more than the budget allows.
    #[error("targets raise levels by {total} points in total; the budget is {max}")]
    OverBudget {
        /// Total increase across factors.
        total: u16,
        /// The budget.
        max: u8,
    },
}
