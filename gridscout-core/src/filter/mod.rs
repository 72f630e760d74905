//! Filtering records for list views.
//!
//! A [`FilterState`] combines three set filters (tier, experience band,
//! attribute tags), four inclusive numeric ranges and a free-text search.
//! Every constraint must hold for a record to be kept. Set filters match
//! any member and pass everything when empty; ranges with no bound on a
//! side are open on that side. The default state keeps every record.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    ExperienceBand, Factor, PerformanceRecord, TagType, Tier, classify, experience_band, tag_set,
};

/// Inclusive `[min, max]` range; a missing bound is unbounded.
///
/// # Examples
/// ```
/// use gridscout_core::ValueRange;
///
/// let range = ValueRange::new(5.0, 10.0);
/// assert!(range.contains(5.0) && range.contains(10.0));
/// assert!(!range.contains(10.5));
/// assert!(ValueRange::at_least(3.0).contains(f64::MAX));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueRange {
    /// Lower bound, inclusive.
    #[serde(default)]
    pub min: Option<f64>,
    /// Upper bound, inclusive.
    #[serde(default)]
    pub max: Option<f64>,
}

impl ValueRange {
    /// A range that contains every value.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// A range bounded on both sides.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// A range bounded below only.
    #[must_use]
    pub const fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    /// A range bounded above only.
    #[must_use]
    pub const fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    /// Whether `value` lies within the range.
    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }

    /// Whether neither side is bounded.
    #[must_use]
    pub const fn is_unbounded(self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Everything a list view can filter by.
///
/// Serialises to a flat JSON object so callers can persist and restore it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterState {
    /// Case-insensitive substring matched against name or id.
    pub search: String,
    /// Tiers to keep.
    pub tiers: BTreeSet<Tier>,
    /// Experience bands to keep.
    pub experience: BTreeSet<ExperienceBand>,
    /// Tags of which a record must carry at least one.
    pub attributes: BTreeSet<TagType>,
    /// Overall score range.
    pub overall: ValueRange,
    /// Speed percentile range.
    pub speed_percentile: ValueRange,
    /// Race count range.
    pub races: ValueRange,
    /// Average finish range.
    pub avg_finish: ValueRange,
}

impl FilterState {
    /// A pass-through filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Add a tier to the tier filter.
    #[must_use]
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tiers.insert(tier);
        self
    }

    /// Add a band to the experience filter.
    #[must_use]
    pub fn with_experience(mut self, band: ExperienceBand) -> Self {
        self.experience.insert(band);
        self
    }

    /// Add a tag to the attribute filter.
    #[must_use]
    pub fn with_attribute(mut self, tag: TagType) -> Self {
        self.attributes.insert(tag);
        self
    }

    /// Restrict overall score.
    #[must_use]
    pub const fn with_overall(mut self, range: ValueRange) -> Self {
        self.overall = range;
        self
    }

    /// Restrict speed percentile.
    #[must_use]
    pub const fn with_speed_percentile(mut self, range: ValueRange) -> Self {
        self.speed_percentile = range;
        self
    }

    /// Restrict race count.
    #[must_use]
    pub const fn with_races(mut self, range: ValueRange) -> Self {
        self.races = range;
        self
    }

    /// Restrict average finish.
    #[must_use]
    pub const fn with_avg_finish(mut self, range: ValueRange) -> Self {
        self.avg_finish = range;
        self
    }

    /// Number of filter groups narrowing the result, for "N filters active"
    /// badges.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        [
            !self.search.trim().is_empty(),
            !self.tiers.is_empty(),
            !self.experience.is_empty(),
            !self.attributes.is_empty(),
            !self.overall.is_unbounded(),
            !self.speed_percentile.is_unbounded(),
            !self.races.is_unbounded(),
            !self.avg_finish.is_unbounded(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Whether the filter keeps every record.
    #[must_use]
    pub fn is_pass_through(&self) -> bool {
        self.active_filter_count() == 0
    }

    /// Whether `record` satisfies every constraint.
    #[must_use]
    pub fn matches(&self, record: &PerformanceRecord) -> bool {
        self.matches_with(record, self.search_needle().as_deref())
    }

    fn search_needle(&self) -> Option<String> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }

    fn matches_with(&self, record: &PerformanceRecord, needle: Option<&str>) -> bool {
        if let Some(text) = needle
            && !record.name.to_lowercase().contains(text)
            && !record.id.to_string().contains(text)
        {
            return false;
        }
        if !self.tiers.is_empty() && !self.tiers.contains(&classify(record).tier) {
            return false;
        }
        if !self.experience.is_empty() && !self.experience.contains(&experience_band(record)) {
            return false;
        }
        if !self.attributes.is_empty() && self.attributes.is_disjoint(&tag_set(record)) {
            return false;
        }
        self.overall.contains(record.overall_score)
            && self
                .speed_percentile
                .contains(record.percentile(Factor::Speed))
            && self.races.contains(f64::from(record.races))
            && self.avg_finish.contains(record.avg_finish)
    }
}

/// Keep the records that satisfy `filters`, preserving input order.
///
/// # Examples
/// ```
/// use gridscout_core::{FilterState, PerformanceRecord, ValueRange, apply_filters};
///
/// let records = vec![
///     PerformanceRecord::new(1, "Mara Voss").with_races(12),
///     PerformanceRecord::new(2, "Jun Park").with_races(3),
/// ];
/// let filters = FilterState::new().with_races(ValueRange::at_least(10.0));
/// let kept = apply_filters(&records, &filters);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].name, "Mara Voss");
/// ```
#[must_use]
pub fn apply_filters<'a>(
    records: &'a [PerformanceRecord],
    filters: &FilterState,
) -> Vec<&'a PerformanceRecord> {
    let needle = filters.search_needle();
    records
        .iter()
        .filter(|record| filters.matches_with(record, needle.as_deref()))
        .collect()
}
