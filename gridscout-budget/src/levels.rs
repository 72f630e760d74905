//! Whole-number percentile levels for the four factors.

use gridscout_core::{Factor, PerformanceRecord};
use serde::{Deserialize, Serialize};

/// Highest percentile a level may take.
pub const MAX_PERCENTILE: u8 = 100;

/// One whole-number percentile per factor.
///
/// # Examples
/// ```
/// use gridscout_budget::SkillLevels;
/// use gridscout_core::{Factor, PerformanceRecord};
///
/// let record = PerformanceRecord::new(1, "Jun Park")
///     .with_percentile(Factor::Speed, 70.4)
///     .with_percentile(Factor::Racecraft, 112.0);
/// let levels = SkillLevels::from_record(&record);
/// assert_eq!(levels.get(Factor::Speed), 70);
/// assert_eq!(levels.get(Factor::Racecraft), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SkillLevels {
    /// Speed percentile.
    pub speed: u8,
    /// Consistency percentile.
    pub consistency: u8,
    /// Racecraft percentile.
    pub racecraft: u8,
    /// Tyre management percentile.
    pub tire_management: u8,
}

impl SkillLevels {
    /// Construct levels in canonical factor order.
    #[must_use]
    pub const fn new(speed: u8, consistency: u8, racecraft: u8, tire_management: u8) -> Self {
        Self {
            speed,
            consistency,
            racecraft,
            tire_management,
        }
    }

    /// The same level for every factor.
    #[must_use]
    pub const fn uniform(level: u8) -> Self {
        Self::new(level, level, level, level)
    }

    /// Snapshot a record's percentiles, clamped to `0..=100` and rounded.
    #[must_use]
    pub fn from_record(record: &PerformanceRecord) -> Self {
        let mut levels = Self::default();
        for factor in Factor::ALL {
            levels.set(factor, percentile_level(record.percentile(factor)));
        }
        levels
    }

    /// Level for `factor`.
    #[must_use]
    pub const fn get(&self, factor: Factor) -> u8 {
        match factor {
            Factor::Speed => self.speed,
            Factor::Consistency => self.consistency,
            Factor::Racecraft => self.racecraft,
            Factor::TireManagement => self.tire_management,
        }
    }

    /// Replace the level for `factor`.
    pub const fn set(&mut self, factor: Factor, level: u8) {
        match factor {
            Factor::Speed => self.speed = level,
            Factor::Consistency => self.consistency = level,
            Factor::Racecraft => self.racecraft = level,
            Factor::TireManagement => self.tire_management = level,
        }
    }

    /// Pairs of factor and level in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, u8)> + '_ {
        Factor::ALL.into_iter().map(|factor| (factor, self.get(factor)))
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is clamped to 0..=100 and rounded before the cast"
)]
fn percentile_level(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, f64::from(MAX_PERCENTILE)).round() as u8
}
