//! Stable ordering of records by a single key.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseIdentifierError, normalise_identifier};
use crate::{Factor, PerformanceRecord};

/// Field to order records by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Composite score.
    #[default]
    OverallScore,
    /// Speed percentile.
    SpeedPercentile,
    /// Consistency percentile.
    ConsistencyPercentile,
    /// Average finishing position.
    AvgFinish,
    /// Race count.
    Races,
    /// Identifier.
    Id,
}

impl SortKey {
    /// Every sort key.
    pub const ALL: [Self; 6] = [
        Self::OverallScore,
        Self::SpeedPercentile,
        Self::ConsistencyPercentile,
        Self::AvgFinish,
        Self::Races,
        Self::Id,
    ];

    /// Return the snake-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OverallScore => "overall_score",
            Self::SpeedPercentile => "speed_percentile",
            Self::ConsistencyPercentile => "consistency_percentile",
            Self::AvgFinish => "avg_finish",
            Self::Races => "races",
            Self::Id => "id",
        }
    }

    /// Ascending comparison of two records under this key.
    #[must_use]
    pub fn compare(self, left: &PerformanceRecord, right: &PerformanceRecord) -> Ordering {
        match self {
            Self::OverallScore => left.overall_score.total_cmp(&right.overall_score),
            Self::SpeedPercentile => left
                .percentile(Factor::Speed)
                .total_cmp(&right.percentile(Factor::Speed)),
            Self::ConsistencyPercentile => left
                .percentile(Factor::Consistency)
                .total_cmp(&right.percentile(Factor::Consistency)),
            Self::AvgFinish => left.avg_finish.total_cmp(&right.avg_finish),
            Self::Races => left.races.cmp(&right.races),
            Self::Id => left.id.cmp(&right.id),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = normalise_identifier(s);
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == normalised)
            .ok_or_else(|| ParseIdentifierError::new("sort key", s))
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Return the identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_identifier(s).as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(ParseIdentifierError::new("sort order", s)),
        }
    }
}

/// Sort records in place, keeping ties in their original order.
///
/// Works on owned records or references, so the output of
/// [`apply_filters`](crate::apply_filters) can be sorted directly.
///
/// # Examples
/// ```
/// use gridscout_core::{PerformanceRecord, SortKey, SortOrder, sort_drivers};
///
/// let mut records = vec![
///     PerformanceRecord::new(1, "A").with_avg_finish(6.0),
///     PerformanceRecord::new(2, "B"),
///     PerformanceRecord::new(3, "C").with_avg_finish(2.0),
/// ];
/// sort_drivers(&mut records, SortKey::AvgFinish, SortOrder::Asc);
/// let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
/// assert_eq!(ids, vec![3, 1, 2]);
/// ```
pub fn sort_drivers<R>(records: &mut [R], key: SortKey, order: SortOrder)
where
    R: Borrow<PerformanceRecord>,
{
    records.sort_by(|left, right| {
        let ordering = key.compare(left.borrow(), right.borrow());
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
