//! Skill-budget allocation for the gridscout driver engine.
//!
//! The crate provides two complementary capabilities:
//! - **Interactive allocation** through [`SkillBudget`], a state machine that
//!   lets callers raise a driver's factor percentiles towards hypothetical
//!   targets while never spending more than [`MAX_TOTAL_INCREASE`] points in
//!   total. Infeasible requests leave the state untouched.
//! - **Recommended allocation** through [`recommend_allocation`], which
//!   spends the budget on the weakest factors first and always yields a
//!   valid starting target.
//!
//! Allocator state is a plain serialisable value. Deserialisation validates
//! every invariant and fails with [`BudgetStateError`] instead of repairing.
//!
//! # Examples
//!
//! ```
//! use gridscout_budget::{SkillBudget, TargetChange};
//! use gridscout_core::{Factor, PerformanceRecord};
//!
//! let record = PerformanceRecord::new(42, "Priya Nair")
//!     .with_percentile(Factor::Speed, 58.0)
//!     .with_percentile(Factor::Consistency, 66.0);
//! let mut budget = SkillBudget::from_record(&record);
//! assert_eq!(
//!     budget.set_target(Factor::Speed, 61),
//!     TargetChange::Committed { value: 61 }
//! );
//! assert_eq!(
//!     budget.set_target(Factor::Consistency, 70),
//!     TargetChange::Clamped { requested: 70, value: 68 }
//! );
//! assert_eq!(budget.remaining_budget(), 0);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod allocator;
mod error;
mod levels;
mod recommend;

pub use allocator::{
    BudgetSnapshot, MAX_TOTAL_INCREASE, ProjectionRequest, SkillBudget, TargetChange,
};
pub use error::BudgetStateError;
pub use levels::{MAX_PERCENTILE, SkillLevels};
pub use recommend::{
    DEEP_WEAKNESS_PERCENTILE, DEEP_WEAKNESS_POINTS, Recommendation, SECOND_WEAKEST_POINTS,
    WEAKNESS_POINTS, recommend_allocation,
};
