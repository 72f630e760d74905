//! Facade crate for the gridscout driver engine.
//!
//! This crate re-exports the classification, tagging, filtering and
//! data-confidence rules, and exposes the skill-budget allocator behind the
//! `budget` feature.
//!
//! ```
//! use gridscout::{PerformanceRecord, Tier, classify};
//!
//! let record = PerformanceRecord::new(1, "Mara Voss")
//!     .with_overall(67.0)
//!     .with_races(12)
//!     .with_avg_finish(2.75);
//! assert_eq!(classify(&record).tier, Tier::Frontrunner);
//! ```

#![forbid(unsafe_code)]

pub use gridscout_core::{
    Classification, ConfidenceLevel, DataConfidence, DriverProfile, ExperienceBand, Factor,
    FactorScore, Factors, FilterState, ParseIdentifierError, PerformanceRecord, Reasoning,
    SortKey, SortOrder, Tag, TagType, Tier, TierCount, TierStyle, ValueRange, apply_filters,
    classify, data_confidence, display_tags, experience_band, generate_tags, sort_drivers,
    summarise_tiers,
};

#[cfg(feature = "budget")]
pub use gridscout_budget::{
    BudgetSnapshot, BudgetStateError, MAX_TOTAL_INCREASE, ProjectionRequest, Recommendation,
    SkillBudget, SkillLevels, TargetChange, recommend_allocation,
};
