//! Descriptive tags layered on top of the tier.
//!
//! Performance and potential tags are additive: any number may apply. The
//! experience group partitions records, so exactly one of its tags is
//! produced for every record.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ParseIdentifierError, normalise_identifier};
use crate::{Factor, PerformanceRecord};

/// Speed percentile at which a driver is a speed specialist.
pub const SPEED_SPECIALIST_PERCENTILE: f64 = 70.0;
/// Consistency percentile at which a driver is a consistency driver.
pub const CONSISTENCY_DRIVER_PERCENTILE: f64 = 60.0;
/// Racecraft percentile at which a driver is tagged wheel-to-wheel.
pub const WHEEL_TO_WHEEL_PERCENTILE: f64 = 60.0;
/// Points by which speed percentile must exceed overall score for the
/// high-upside tag.
pub const HIGH_UPSIDE_MARGIN: f64 = 10.0;
/// Races needed for the veteran band.
pub const VETERAN_RACES: u32 = 10;
/// Races needed for the developing band.
pub const DEVELOPING_RACES: u32 = 5;

/// Which family a tag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagGroup {
    /// Factor strengths.
    Performance,
    /// Career length; a strict partition.
    Experience,
    /// Upside relative to current output.
    Potential,
}

/// Every tag the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagType {
    /// Speed percentile of 70 or more.
    SpeedSpecialist,
    /// Consistency percentile of 60 or more.
    ConsistencyDriver,
    /// Racecraft percentile of 60 or more.
    WheelToWheel,
    /// Ten races or more.
    Veteran,
    /// Five to nine races.
    Developing,
    /// Fewer than five races.
    Rookie,
    /// Speed well ahead of overall output.
    HighUpside,
}

impl TagType {
    /// Every tag type in display order.
    pub const ALL: [Self; 7] = [
        Self::SpeedSpecialist,
        Self::ConsistencyDriver,
        Self::WheelToWheel,
        Self::Veteran,
        Self::Developing,
        Self::Rookie,
        Self::HighUpside,
    ];

    /// Return the snake-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SpeedSpecialist => "speed_specialist",
            Self::ConsistencyDriver => "consistency_driver",
            Self::WheelToWheel => "wheel_to_wheel",
            Self::Veteran => "veteran",
            Self::Developing => "developing",
            Self::Rookie => "rookie",
            Self::HighUpside => "high_upside",
        }
    }

    /// Return the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SpeedSpecialist => "Speed Specialist",
            Self::ConsistencyDriver => "Consistency Driver",
            Self::WheelToWheel => "Wheel-to-Wheel",
            Self::Veteran => "Veteran",
            Self::Developing => "Developing",
            Self::Rookie => "Rookie",
            Self::HighUpside => "High Upside",
        }
    }

    /// Return the badge icon, if the tag has one.
    #[must_use]
    pub const fn icon(self) -> Option<&'static str> {
        match self {
            Self::SpeedSpecialist => Some("⚡"),
            Self::ConsistencyDriver => Some("🎯"),
            Self::WheelToWheel => Some("⚔️"),
            Self::HighUpside => Some("📈"),
            Self::Veteran | Self::Developing | Self::Rookie => None,
        }
    }

    /// Return the family of the tag.
    #[must_use]
    pub const fn group(self) -> TagGroup {
        match self {
            Self::SpeedSpecialist | Self::ConsistencyDriver | Self::WheelToWheel => {
                TagGroup::Performance
            }
            Self::Veteran | Self::Developing | Self::Rookie => TagGroup::Experience,
            Self::HighUpside => TagGroup::Potential,
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagType {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = normalise_identifier(s);
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == normalised)
            .ok_or_else(|| ParseIdentifierError::new("tag type", s))
    }
}

/// Career-length band; exactly one applies to each record.
///
/// # Examples
/// ```
/// use gridscout_core::ExperienceBand;
///
/// assert_eq!(ExperienceBand::from_races(10), ExperienceBand::Veteran);
/// assert_eq!(ExperienceBand::from_races(5), ExperienceBand::Developing);
/// assert_eq!(ExperienceBand::from_races(0), ExperienceBand::Rookie);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceBand {
    /// Ten races or more.
    Veteran,
    /// Five to nine races.
    Developing,
    /// Fewer than five races.
    Rookie,
}

impl ExperienceBand {
    /// Band for a race count, checked from the top down.
    #[must_use]
    pub const fn from_races(races: u32) -> Self {
        if races >= VETERAN_RACES {
            Self::Veteran
        } else if races >= DEVELOPING_RACES {
            Self::Developing
        } else {
            Self::Rookie
        }
    }

    /// The tag emitted for this band.
    #[must_use]
    pub const fn tag_type(self) -> TagType {
        match self {
            Self::Veteran => TagType::Veteran,
            Self::Developing => TagType::Developing,
            Self::Rookie => TagType::Rookie,
        }
    }

    /// Return the snake-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.tag_type().as_str()
    }
}

impl fmt::Display for ExperienceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceBand {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_identifier(s).as_str() {
            "veteran" => Ok(Self::Veteran),
            "developing" => Ok(Self::Developing),
            "rookie" => Ok(Self::Rookie),
            _ => Err(ParseIdentifierError::new("experience band", s)),
        }
    }
}

/// A display tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    /// Tag identifier.
    #[serde(rename = "type")]
    pub tag_type: TagType,
    /// Display label.
    pub label: &'static str,
    /// Optional badge icon.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'static str>,
}

impl From<TagType> for Tag {
    fn from(tag_type: TagType) -> Self {
        Self {
            tag_type,
            label: tag_type.label(),
            icon: tag_type.icon(),
        }
    }
}

/// Experience band of a record.
#[must_use]
pub const fn experience_band(record: &PerformanceRecord) -> ExperienceBand {
    ExperienceBand::from_races(record.races)
}

/// Tags for `record`: performance tags, then the experience tag, then the
/// potential tag.
///
/// # Examples
/// ```
/// use gridscout_core::{Factor, PerformanceRecord, TagType, generate_tags};
///
/// let record = PerformanceRecord::new(3, "Ines Duarte")
///     .with_overall(55.0)
///     .with_races(4)
///     .with_percentile(Factor::Speed, 72.0);
/// let types: Vec<TagType> = generate_tags(&record).iter().map(|tag| tag.tag_type).collect();
/// assert_eq!(
///     types,
///     vec![TagType::SpeedSpecialist, TagType::Rookie, TagType::HighUpside]
/// );
/// ```
#[must_use]
pub fn generate_tags(record: &PerformanceRecord) -> Vec<Tag> {
    tag_types(record).into_iter().map(Tag::from).collect()
}

/// The ordered tag identifiers for `record`, without display metadata.
#[must_use]
pub fn tag_types(record: &PerformanceRecord) -> Vec<TagType> {
    let mut tags = Vec::with_capacity(5);
    if record.percentile(Factor::Speed) >= SPEED_SPECIALIST_PERCENTILE {
        tags.push(TagType::SpeedSpecialist);
    }
    if record.percentile(Factor::Consistency) >= CONSISTENCY_DRIVER_PERCENTILE {
        tags.push(TagType::ConsistencyDriver);
    }
    if record.percentile(Factor::Racecraft) >= WHEEL_TO_WHEEL_PERCENTILE {
        tags.push(TagType::WheelToWheel);
    }
    tags.push(experience_band(record).tag_type());
    if has_high_upside(record) {
        tags.push(TagType::HighUpside);
    }
    tags
}

/// The record's tag identifiers as a set, for membership tests.
#[must_use]
pub fn tag_set(record: &PerformanceRecord) -> BTreeSet<TagType> {
    tag_types(record).into_iter().collect()
}

/// The first `limit` tags, for compact badges.
#[must_use]
pub fn display_tags(tags: &[Tag], limit: usize) -> &[Tag] {
    tags.get(..limit).unwrap_or(tags)
}

#[expect(
    clippy::float_arithmetic,
    reason = "the upside test offsets the overall score by a fixed margin"
)]
fn has_high_upside(record: &PerformanceRecord) -> bool {
    record.percentile(Factor::Speed) > record.overall_score + HIGH_UPSIDE_MARGIN
}
