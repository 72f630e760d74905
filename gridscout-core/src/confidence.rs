//! Trust bands derived from sample size.
//!
//! Metrics computed over a handful of races move a lot between events, so
//! views flag them. The band depends only on the race count.

use serde::Serialize;

/// Races needed before metrics are considered settled.
pub const HIGH_CONFIDENCE_RACES: u32 = 10;
/// Races needed before metrics stop being treated as provisional.
pub const MODERATE_CONFIDENCE_RACES: u32 = 5;

/// Trust band for a record's metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    /// Fewer than five races.
    Low,
    /// Five to nine races.
    Moderate,
    /// Ten races or more.
    High,
}

/// Display-ready data confidence for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataConfidence {
    /// Trust band.
    pub level: ConfidenceLevel,
    /// Short label for badges.
    pub label: &'static str,
    /// Badge colour.
    pub color: &'static str,
    /// Whether views should surface a caution next to the metrics.
    #[serde(rename = "showWarning")]
    pub show_warning: bool,
    /// Caution text, present exactly when `show_warning` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// Map a race count to its data confidence.
///
/// # Examples
/// ```
/// use gridscout_core::{ConfidenceLevel, data_confidence};
///
/// assert_eq!(data_confidence(4).level, ConfidenceLevel::Low);
/// assert_eq!(data_confidence(7).level, ConfidenceLevel::Moderate);
/// assert!(!data_confidence(12).show_warning);
/// ```
#[must_use]
pub const fn data_confidence(races: u32) -> DataConfidence {
    if races >= HIGH_CONFIDENCE_RACES {
        DataConfidence {
            level: ConfidenceLevel::High,
            label: "High Confidence",
            color: "#16A34A",
            show_warning: false,
            message: None,
        }
    } else if races >= MODERATE_CONFIDENCE_RACES {
        DataConfidence {
            level: ConfidenceLevel::Moderate,
            label: "Moderate Confidence",
            color: "#D97706",
            show_warning: true,
            message: Some("Limited sample: metrics stabilizing with more data."),
        }
    } else {
        DataConfidence {
            level: ConfidenceLevel::Low,
            label: "Low Confidence",
            color: "#DC2626",
            show_warning: true,
            message: Some("Very limited sample: metrics subject to significant change."),
        }
    }
}
