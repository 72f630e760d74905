//! Per-record aggregates for list and detail views.

use serde::Serialize;

use crate::{
    Classification, DataConfidence, PerformanceRecord, Tag, Tier, classify, data_confidence,
    generate_tags,
};

/// Everything a view shows next to a driver's name.
///
/// # Examples
/// ```
/// use gridscout_core::{DriverProfile, PerformanceRecord, Tier};
///
/// let record = PerformanceRecord::new(9, "Noor Haddad").with_overall(52.0).with_races(6);
/// let profile = DriverProfile::from_record(&record);
/// assert_eq!(profile.classification.tier, Tier::MidPack);
/// assert!(profile.confidence.show_warning);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverProfile {
    /// Driver identifier.
    pub id: u64,
    /// Driver name.
    pub name: String,
    /// Tier assignment.
    pub classification: Classification,
    /// Tags in display order.
    pub tags: Vec<Tag>,
    /// Trust band of the metrics.
    pub confidence: DataConfidence,
}

impl DriverProfile {
    /// Evaluate classification, tags and confidence for `record`.
    #[must_use]
    pub fn from_record(record: &PerformanceRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            classification: classify(record),
            tags: generate_tags(record),
            confidence: data_confidence(record.races),
        }
    }
}

/// Number of records in one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierCount {
    /// The tier.
    pub tier: Tier,
    /// Records classified into it.
    pub count: usize,
}

/// Count records per tier, highest tier first; empty tiers are included.
#[must_use]
pub fn summarise_tiers<'a, I>(records: I) -> Vec<TierCount>
where
    I: IntoIterator<Item = &'a PerformanceRecord>,
{
    let mut counts = Tier::ALL.map(|tier| TierCount { tier, count: 0 });
    for record in records {
        let tier = classify(record).tier;
        if let Some(entry) = counts.iter_mut().find(|entry| entry.tier == tier) {
            entry.count += 1;
        }
    }
    counts.to_vec()
}
