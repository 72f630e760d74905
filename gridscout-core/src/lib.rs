//! Classification, tagging, filtering and data-confidence rules for the
//! gridscout driver engine.
//!
//! Every function here is pure and total over partially populated
//! [`PerformanceRecord`]s: missing fields fall back to defaults instead of
//! producing errors, so the same record always yields the same tier, tags and
//! confidence band. Nothing is cached; recompute on demand.
//!
//! # Examples
//!
//! ```
//! use gridscout_core::{
//!     FilterState, PerformanceRecord, SortKey, SortOrder, Tier, apply_filters, sort_drivers,
//! };
//!
//! let roster = vec![
//!     PerformanceRecord::new(1, "Mara Voss").with_overall(67.0).with_races(12).with_avg_finish(2.75),
//!     PerformanceRecord::new(2, "Jun Park").with_overall(62.0).with_races(3),
//!     PerformanceRecord::new(3, "Ines Duarte").with_overall(55.0).with_races(7),
//! ];
//! let filters = FilterState::new()
//!     .with_tier(Tier::Frontrunner)
//!     .with_tier(Tier::Contender);
//! let mut shortlist = apply_filters(&roster, &filters);
//! sort_drivers(&mut shortlist, SortKey::Races, SortOrder::Asc);
//! assert_eq!(shortlist.iter().map(|r| r.id).collect::<Vec<_>>(), vec![2, 1]);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod classification;
mod confidence;
mod error;
mod filter;
mod profile;
mod record;
mod sort;
mod tags;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use classification::{
    CLASSIFICATION_RULES, CONTENDER_MIN_OVERALL, Classification, ClassificationRule,
    FRONTRUNNER_MAX_AVG_FINISH, FRONTRUNNER_MIN_OVERALL, FRONTRUNNER_MIN_RACES,
    MID_PACK_MIN_OVERALL, PHENOM_MAX_RACES, PHENOM_MIN_SPEED_PERCENTILE, Reasoning, Tier,
    TierStyle, classify, is_speed_phenom,
};
pub use confidence::{
    ConfidenceLevel, DataConfidence, HIGH_CONFIDENCE_RACES, MODERATE_CONFIDENCE_RACES,
    data_confidence,
};
pub use error::ParseIdentifierError;
pub use filter::{FilterState, ValueRange, apply_filters};
pub use profile::{DriverProfile, TierCount, summarise_tiers};
pub use record::{Factor, FactorScore, Factors, PerformanceRecord, WORST_AVG_FINISH, duplicate_ids};
pub use sort::{SortKey, SortOrder, sort_drivers};
pub use tags::{
    CONSISTENCY_DRIVER_PERCENTILE, DEVELOPING_RACES, ExperienceBand, HIGH_UPSIDE_MARGIN,
    SPEED_SPECIALIST_PERCENTILE, Tag, TagGroup, TagType, VETERAN_RACES, WHEEL_TO_WHEEL_PERCENTILE,
    display_tags, experience_band, generate_tags, tag_set, tag_types,
};
