//! Tier classification.
//!
//! A record is classified by walking [`CLASSIFICATION_RULES`] top-down and
//! taking the first rule whose predicate holds. The last rule always holds,
//! so every record receives a tier. Reasoning text lives in [`Reasoning`],
//! keyed by the branch that fired.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{ParseIdentifierError, normalise_identifier};
use crate::{Factor, PerformanceRecord};

/// Minimum overall score for a frontrunner.
pub const FRONTRUNNER_MIN_OVERALL: f64 = 65.0;
/// Minimum race count for a frontrunner.
pub const FRONTRUNNER_MIN_RACES: u32 = 10;
/// Average finish a frontrunner must beat (strictly).
pub const FRONTRUNNER_MAX_AVG_FINISH: f64 = 5.0;
/// Minimum overall score for a contender.
pub const CONTENDER_MIN_OVERALL: f64 = 60.0;
/// Speed percentile at which a short-career driver counts as a speed phenom.
pub const PHENOM_MIN_SPEED_PERCENTILE: f64 = 70.0;
/// Most races a driver may have and still count as a speed phenom.
pub const PHENOM_MAX_RACES: u32 = 6;
/// Minimum overall score for the mid-pack.
pub const MID_PACK_MIN_OVERALL: f64 = 50.0;

/// Ordered classification buckets.
///
/// Variants are declared lowest first so the derived ordering ranks
/// [`Tier::Frontrunner`] highest.
///
/// # Examples
/// ```
/// use gridscout_core::Tier;
///
/// assert!(Tier::Frontrunner > Tier::Contender);
/// assert_eq!(Tier::MidPack.as_str(), "MID_PACK");
/// assert_eq!("mid-pack".parse::<Tier>(), Ok(Tier::MidPack));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    /// Early-career or struggling drivers.
    Development,
    /// Regular points scorers.
    MidPack,
    /// Podium-level or high-upside drivers.
    Contender,
    /// Proven race winners.
    Frontrunner,
}

/// Static display identity of a tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierStyle {
    /// Badge label.
    pub label: &'static str,
    /// Foreground colour.
    pub color: &'static str,
    /// Background colour.
    #[serde(rename = "bgColor")]
    pub bg_color: &'static str,
    /// One-line description for legends.
    pub description: &'static str,
}

impl Tier {
    /// Every tier, highest first.
    pub const ALL: [Self; 4] = [
        Self::Frontrunner,
        Self::Contender,
        Self::MidPack,
        Self::Development,
    ];

    /// Return the upper-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frontrunner => "FRONTRUNNER",
            Self::Contender => "CONTENDER",
            Self::MidPack => "MID_PACK",
            Self::Development => "DEVELOPMENT",
        }
    }

    /// Look up the display identity.
    #[must_use]
    pub const fn style(self) -> TierStyle {
        match self {
            Self::Frontrunner => TierStyle {
                label: "Frontrunner",
                color: "#B45309",
                bg_color: "#FEF3C7",
                description: "Race-winning pace backed by a proven record",
            },
            Self::Contender => TierStyle {
                label: "Contender",
                color: "#1D4ED8",
                bg_color: "#DBEAFE",
                description: "Podium-capable, or raw speed with room to grow",
            },
            Self::MidPack => TierStyle {
                label: "Mid-Pack",
                color: "#047857",
                bg_color: "#D1FAE5",
                description: "Reliable points scorer in the midfield",
            },
            Self::Development => TierStyle {
                label: "Development",
                color: "#4B5563",
                bg_color: "#F3F4F6",
                description: "Building fundamentals through a structured program",
            },
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_identifier(s).as_str() {
            "frontrunner" => Ok(Self::Frontrunner),
            "contender" => Ok(Self::Contender),
            "mid_pack" | "midpack" => Ok(Self::MidPack),
            "development" => Ok(Self::Development),
            _ => Err(ParseIdentifierError::new("tier", s)),
        }
    }
}

/// Explanation attached to a classification, one per rule branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reasoning {
    /// Frontrunner rule.
    ProvenTrackRecord,
    /// Contender rule, speed-phenom wording.
    EliteRawSpeed,
    /// Contender rule, overall-score wording.
    PodiumConsistency,
    /// Mid-pack rule.
    PointsScoring,
    /// Development fallback.
    StructuredProgram,
}

impl Reasoning {
    /// Return the explanatory text.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::ProvenTrackRecord => "Elite performance with proven track record",
            Self::EliteRawSpeed => "Speed phenom: elite raw speed with high upside potential",
            Self::PodiumConsistency => "Consistent podium-level performance",
            Self::PointsScoring => "Solid points-scoring capability",
            Self::StructuredProgram => "Development case requiring structured program",
        }
    }
}

impl fmt::Display for Reasoning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Serialize for Reasoning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

/// Result of classifying one record.
///
/// Never stored: recompute it whenever the record is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// The assigned tier.
    #[serde(rename = "id")]
    pub tier: Tier,
    /// Display identity of the tier.
    #[serde(flatten)]
    pub style: TierStyle,
    /// Confidence in the assignment, `0..=100`.
    pub confidence: u8,
    /// Why the rule fired.
    pub reasoning: Reasoning,
}

/// One entry in the ordered classification table.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    tier: Tier,
    confidence: u8,
    applies: fn(&PerformanceRecord) -> bool,
    explain: fn(&PerformanceRecord) -> Reasoning,
}

impl ClassificationRule {
    /// Tier assigned when this rule fires.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Confidence reported when this rule fires.
    #[must_use]
    pub const fn confidence(&self) -> u8 {
        self.confidence
    }

    /// Whether the rule's predicate holds for `record`.
    #[must_use]
    pub fn matches(&self, record: &PerformanceRecord) -> bool {
        (self.applies)(record)
    }

    /// Build the classification this rule yields, ignoring precedence.
    #[must_use]
    pub fn build(&self, record: &PerformanceRecord) -> Classification {
        Classification {
            tier: self.tier,
            style: self.tier.style(),
            confidence: self.confidence,
            reasoning: (self.explain)(record),
        }
    }
}

const DEVELOPMENT_RULE: ClassificationRule = ClassificationRule {
    tier: Tier::Development,
    confidence: 70,
    applies: always,
    explain: structured_program,
};

/// The classification table in priority order; first match wins.
pub static CLASSIFICATION_RULES: [ClassificationRule; 4] = [
    ClassificationRule {
        tier: Tier::Frontrunner,
        confidence: 95,
        applies: is_frontrunner,
        explain: proven_track_record,
    },
    ClassificationRule {
        tier: Tier::Contender,
        confidence: 85,
        applies: is_contender,
        explain: contender_reasoning,
    },
    ClassificationRule {
        tier: Tier::MidPack,
        confidence: 80,
        applies: is_mid_pack,
        explain: points_scoring,
    },
    DEVELOPMENT_RULE,
];

/// Classify a record into its tier.
///
/// # Examples
/// ```
/// use gridscout_core::{PerformanceRecord, Tier, classify};
///
/// let record = PerformanceRecord::new(1, "Mara Voss")
///     .with_overall(67.0)
///     .with_races(12)
///     .with_avg_finish(2.75);
/// let classification = classify(&record);
/// assert_eq!(classification.tier, Tier::Frontrunner);
/// assert_eq!(classification.confidence, 95);
/// ```
#[must_use]
pub fn classify(record: &PerformanceRecord) -> Classification {
    let rule = CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(record))
        .unwrap_or(&DEVELOPMENT_RULE);
    log::debug!("driver {} classified as {}", record.id, rule.tier);
    rule.build(record)
}

/// Whether `record` is a short-career driver with elite raw speed.
#[must_use]
pub fn is_speed_phenom(record: &PerformanceRecord) -> bool {
    record.percentile(Factor::Speed) >= PHENOM_MIN_SPEED_PERCENTILE
        && record.races <= PHENOM_MAX_RACES
}

fn is_frontrunner(record: &PerformanceRecord) -> bool {
    record.overall_score >= FRONTRUNNER_MIN_OVERALL
        && record.races >= FRONTRUNNER_MIN_RACES
        && record.avg_finish < FRONTRUNNER_MAX_AVG_FINISH
}

fn is_contender(record: &PerformanceRecord) -> bool {
    record.overall_score >= CONTENDER_MIN_OVERALL || is_speed_phenom(record)
}

fn is_mid_pack(record: &PerformanceRecord) -> bool {
    record.overall_score >= MID_PACK_MIN_OVERALL
}

const fn always(_record: &PerformanceRecord) -> bool {
    true
}

const fn proven_track_record(_record: &PerformanceRecord) -> Reasoning {
    Reasoning::ProvenTrackRecord
}

// Re-tests the speed clause on its own, so a driver admitted on overall score
// who also meets it gets the speed wording.
fn contender_reasoning(record: &PerformanceRecord) -> Reasoning {
    if is_speed_phenom(record) {
        Reasoning::EliteRawSpeed
    } else {
        Reasoning::PodiumConsistency
    }
}

const fn points_scoring(_record: &PerformanceRecord) -> Reasoning {
    Reasoning::PointsScoring
}

const fn structured_program(_record: &PerformanceRecord) -> Reasoning {
    Reasoning::StructuredProgram
}

#[cfg(test)]
mod tests;
