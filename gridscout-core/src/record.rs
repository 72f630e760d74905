//! Performance records and the four skill factors they carry.
//!
//! Every numeric field has a default so partially populated records stay
//! usable by every engine function: absent scores, percentiles and race
//! counts read as zero and an absent average finish reads as
//! [`WORST_AVG_FINISH`]. JSON `null` is treated the same as an absent field.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ParseIdentifierError, normalise_identifier};

/// Average finishing position assumed when a record carries none.
pub const WORST_AVG_FINISH: f64 = 999.0;

/// One of the four correlated skill dimensions tracked per driver.
///
/// # Examples
/// ```
/// use gridscout_core::Factor;
///
/// assert_eq!(Factor::TireManagement.as_str(), "tire_management");
/// assert_eq!("tire-management".parse::<Factor>(), Ok(Factor::TireManagement));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Raw pace over a single lap.
    Speed,
    /// Lap-to-lap repeatability.
    Consistency,
    /// Overtaking and defending.
    Racecraft,
    /// Preserving tyre life across a stint.
    TireManagement,
}

impl Factor {
    /// Every factor in canonical order.
    pub const ALL: [Self; 4] = [
        Self::Speed,
        Self::Consistency,
        Self::Racecraft,
        Self::TireManagement,
    ];

    /// Return the snake-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Speed => "speed",
            Self::Consistency => "consistency",
            Self::Racecraft => "racecraft",
            Self::TireManagement => "tire_management",
        }
    }

    /// Return the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Speed => "Speed",
            Self::Consistency => "Consistency",
            Self::Racecraft => "Racecraft",
            Self::TireManagement => "Tire Management",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Factor {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_identifier(s).as_str() {
            "speed" => Ok(Self::Speed),
            "consistency" => Ok(Self::Consistency),
            "racecraft" => Ok(Self::Racecraft),
            "tire_management" | "tyre_management" => Ok(Self::TireManagement),
            _ => Err(ParseIdentifierError::new("factor", s)),
        }
    }
}

/// Raw score and field-relative percentile for one factor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorScore {
    /// Absolute score in `0..=100`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    /// Standing among the field in `0..=100`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub percentile: f64,
}

impl FactorScore {
    /// Construct a factor score.
    #[must_use]
    pub const fn new(score: f64, percentile: f64) -> Self {
        Self { score, percentile }
    }
}

/// The four factor scores of a record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Factors {
    /// Raw pace.
    #[serde(default, deserialize_with = "null_as_default")]
    pub speed: FactorScore,
    /// Lap-to-lap repeatability.
    #[serde(default, deserialize_with = "null_as_default")]
    pub consistency: FactorScore,
    /// Wheel-to-wheel ability.
    #[serde(default, deserialize_with = "null_as_default")]
    pub racecraft: FactorScore,
    /// Tyre preservation.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tire_management: FactorScore,
}

impl Factors {
    /// Return the score for `factor`.
    #[must_use]
    pub const fn get(&self, factor: Factor) -> FactorScore {
        match factor {
            Factor::Speed => self.speed,
            Factor::Consistency => self.consistency,
            Factor::Racecraft => self.racecraft,
            Factor::TireManagement => self.tire_management,
        }
    }

    /// Replace the score for `factor`.
    pub const fn set(&mut self, factor: Factor, value: FactorScore) {
        match factor {
            Factor::Speed => self.speed = value,
            Factor::Consistency => self.consistency = value,
            Factor::Racecraft => self.racecraft = value,
            Factor::TireManagement => self.tire_management = value,
        }
    }
}

/// A driver's aggregated performance across the races on record.
///
/// Only `id` is required when deserialising; see the module docs for the
/// defaults applied to everything else.
///
/// # Examples
/// ```
/// use gridscout_core::{Factor, PerformanceRecord, WORST_AVG_FINISH};
///
/// let record: PerformanceRecord = serde_json::from_str(r#"{"id": 7}"#).unwrap();
/// assert_eq!(record.races, 0);
/// assert_eq!(record.avg_finish, WORST_AVG_FINISH);
///
/// let built = PerformanceRecord::new(7, "Ayla Reyes")
///     .with_overall(58.0)
///     .with_percentile(Factor::Speed, 81.0);
/// assert_eq!(built.percentile(Factor::Speed), 81.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    /// Unique identifier.
    pub id: u64,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Composite score in `0..=100`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_score: f64,
    /// Number of races on record.
    #[serde(default, deserialize_with = "null_as_default")]
    pub races: u32,
    /// Mean finishing position; lower is better.
    #[serde(default = "worst_avg_finish", deserialize_with = "avg_finish_or_worst")]
    pub avg_finish: f64,
    /// Per-factor scores and percentiles.
    #[serde(default, deserialize_with = "null_as_default")]
    pub factors: Factors,
}

impl PerformanceRecord {
    /// Construct a record with every numeric field at its default.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            overall_score: 0.0,
            races: 0,
            avg_finish: WORST_AVG_FINISH,
            factors: Factors::default(),
        }
    }

    /// Percentile for `factor`.
    #[must_use]
    pub const fn percentile(&self, factor: Factor) -> f64 {
        self.factors.get(factor).percentile
    }

    /// Set the overall score.
    #[must_use]
    pub fn with_overall(mut self, overall_score: f64) -> Self {
        self.overall_score = overall_score;
        self
    }

    /// Set the race count.
    #[must_use]
    pub fn with_races(mut self, races: u32) -> Self {
        self.races = races;
        self
    }

    /// Set the average finish; non-positive or non-finite values fall back
    /// to [`WORST_AVG_FINISH`].
    #[must_use]
    pub fn with_avg_finish(mut self, avg_finish: f64) -> Self {
        self.avg_finish = sanitise_avg_finish(avg_finish);
        self
    }

    /// Set the percentile for one factor, keeping its score.
    #[must_use]
    pub fn with_percentile(mut self, factor: Factor, percentile: f64) -> Self {
        let current = self.factors.get(factor);
        self.factors
            .set(factor, FactorScore::new(current.score, percentile));
        self
    }

    /// Set score and percentile for one factor.
    #[must_use]
    pub fn with_factor(mut self, factor: Factor, value: FactorScore) -> Self {
        self.factors.set(factor, value);
        self
    }
}

/// Return identifiers that appear more than once in `records`.
///
/// Engine functions tolerate duplicates. Views keyed by id do not, so
/// callers decide how to report them.
#[must_use]
pub fn duplicate_ids(records: &[PerformanceRecord]) -> BTreeSet<u64> {
    let mut seen = BTreeSet::new();
    records
        .iter()
        .filter(|record| !seen.insert(record.id))
        .map(|record| record.id)
        .collect()
}

const fn worst_avg_finish() -> f64 {
    WORST_AVG_FINISH
}

fn sanitise_avg_finish(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        WORST_AVG_FINISH
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn avg_finish_or_worst<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map_or(WORST_AVG_FINISH, sanitise_avg_finish))
}
