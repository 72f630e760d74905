//! The skill-budget allocator.
//!
//! A [`SkillBudget`] holds an immutable snapshot of a driver's current
//! percentiles and a mutable set of targets. Four independent controls share
//! one pool of [`MAX_TOTAL_INCREASE`] points, so every mutation re-derives
//! the points spent on the other factors from the committed targets before
//! deciding what to commit. Requests that cannot be honoured leave the state
//! untouched; they are product-rule rejections, not errors.

use gridscout_core::{Factor, PerformanceRecord};
use serde::{Deserialize, Serialize};

use crate::{BudgetStateError, MAX_PERCENTILE, Recommendation, SkillLevels};

/// Total percentile points that may be added across all factors.
pub const MAX_TOTAL_INCREASE: u8 = 5;

/// Outcome of a target mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetChange {
    /// The requested value was committed.
    Committed {
        /// The new target.
        value: u8,
    },
    /// Only part of the requested increase fitted in the budget.
    Clamped {
        /// What the caller asked for.
        requested: u8,
        /// The committed target.
        value: u8,
    },
    /// Nothing changed.
    Unchanged,
}

impl TargetChange {
    /// Whether the state was written.
    #[must_use]
    pub const fn is_committed(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Allocator output handed to rendering code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    /// Current percentiles.
    pub current: SkillLevels,
    /// Target percentiles.
    pub target: SkillLevels,
    /// Points still unspent.
    pub remaining_budget: u8,
}

/// Target-skill vector submitted to an external ranking service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// Driver the projection is for.
    pub driver_id: u64,
    /// Hypothetical percentiles to project.
    pub target_skills: SkillLevels,
}

/// Interactive allocation of skill points for one driver.
///
/// Invariants, held after every operation and checked on deserialisation:
/// each target lies in `current..=100`, and the targets add at most
/// [`MAX_TOTAL_INCREASE`] points over the current levels in total.
///
/// # Examples
/// ```
/// use gridscout_budget::{SkillBudget, SkillLevels};
/// use gridscout_core::Factor;
///
/// let mut budget = SkillBudget::new(7, SkillLevels::uniform(50));
/// for _ in 0..5 {
///     budget.increment(Factor::Speed);
/// }
/// assert_eq!(budget.target().get(Factor::Speed), 55);
/// assert_eq!(budget.remaining_budget(), 0);
/// assert!(!budget.increment(Factor::Consistency).is_committed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PersistedBudget")]
pub struct SkillBudget {
    driver_id: u64,
    current: SkillLevels,
    target: SkillLevels,
}

impl SkillBudget {
    /// Start an allocation with the full budget available.
    ///
    /// Levels above 100 are lowered to 100.
    #[must_use]
    pub fn new(driver_id: u64, current: SkillLevels) -> Self {
        let mut capped = current;
        for factor in Factor::ALL {
            capped.set(factor, current.get(factor).min(MAX_PERCENTILE));
        }
        Self {
            driver_id,
            current: capped,
            target: capped,
        }
    }

    /// Start an allocation from a record's percentiles.
    #[must_use]
    pub fn from_record(record: &PerformanceRecord) -> Self {
        Self::new(record.id, SkillLevels::from_record(record))
    }

    /// Start an allocation seeded with the recommended targets.
    #[must_use]
    pub fn recommended(record: &PerformanceRecord) -> (Self, Recommendation) {
        let mut budget = Self::from_record(record);
        let recommendation = crate::recommend_allocation(budget.current);
        budget.apply_recommendation(&recommendation);
        (budget, recommendation)
    }

    /// Driver this allocation belongs to.
    #[must_use]
    pub const fn driver_id(&self) -> u64 {
        self.driver_id
    }

    /// Current percentiles.
    #[must_use]
    pub const fn current(&self) -> SkillLevels {
        self.current
    }

    /// Target percentiles.
    #[must_use]
    pub const fn target(&self) -> SkillLevels {
        self.target
    }

    /// Points added to `factor`.
    #[must_use]
    pub const fn increase(&self, factor: Factor) -> u8 {
        self.target
            .get(factor)
            .saturating_sub(self.current.get(factor))
    }

    /// Points spent across all factors.
    #[must_use]
    pub fn total_increase(&self) -> u8 {
        Factor::ALL
            .into_iter()
            .map(|factor| self.increase(factor))
            .fold(0, u8::saturating_add)
    }

    /// Points still available, in `0..=MAX_TOTAL_INCREASE`.
    #[must_use]
    pub fn remaining_budget(&self) -> u8 {
        MAX_TOTAL_INCREASE.saturating_sub(self.total_increase())
    }

    /// Propose a new target for `factor`.
    ///
    /// Proposals below the current level are ignored and proposals above 100
    /// are read as 100. When the increase does not fit in the budget left by
    /// the other factors, the largest value that fits is committed instead.
    /// The outcome is [`TargetChange::Unchanged`] exactly when the target
    /// keeps its previous value.
    pub fn set_target(&mut self, factor: Factor, proposed: u8) -> TargetChange {
        let current = self.current.get(factor);
        let bounded = proposed.min(MAX_PERCENTILE);
        if bounded < current {
            log::trace!(
                "driver {}: ignoring {factor} target {proposed} below current {current}",
                self.driver_id
            );
            return TargetChange::Unchanged;
        }

        let available = self.available_for(factor);
        let value = bounded.min(current.saturating_add(available));
        if value == self.target.get(factor) {
            log::trace!(
                "driver {}: {factor} target already {value}, ignoring {proposed}",
                self.driver_id
            );
            return TargetChange::Unchanged;
        }

        self.target.set(factor, value);
        if value == proposed {
            log::debug!("driver {}: {factor} target set to {value}", self.driver_id);
            TargetChange::Committed { value }
        } else {
            log::debug!(
                "driver {}: {factor} target {proposed} clamped to {value}",
                self.driver_id
            );
            TargetChange::Clamped {
                requested: proposed,
                value,
            }
        }
    }

    /// Raise the target for `factor` by one point.
    pub fn increment(&mut self, factor: Factor) -> TargetChange {
        let target = self.target.get(factor);
        if target >= MAX_PERCENTILE {
            return TargetChange::Unchanged;
        }
        self.set_target(factor, target.saturating_add(1))
    }

    /// Lower the target for `factor` by one point, never below current.
    pub fn decrement(&mut self, factor: Factor) -> TargetChange {
        let target = self.target.get(factor);
        if target <= self.current.get(factor) {
            return TargetChange::Unchanged;
        }
        self.set_target(factor, target.saturating_sub(1))
    }

    /// Re-snapshot from `record` and restore the full budget.
    pub fn reset(&mut self, record: &PerformanceRecord) {
        *self = Self::from_record(record);
        log::debug!("driver {}: allocation reset", self.driver_id);
    }

    /// Reset only when `record` is a different driver or its percentiles
    /// moved. Returns whether a reset happened.
    pub fn sync_with(&mut self, record: &PerformanceRecord) -> bool {
        let unchanged =
            self.driver_id == record.id && self.current == SkillLevels::from_record(record);
        if !unchanged {
            self.reset(record);
        }
        !unchanged
    }

    /// Replace the targets with a recommendation's, one factor at a time.
    ///
    /// Targets go through [`Self::set_target`], so a recommendation computed
    /// for other levels can never break the invariants.
    pub fn apply_recommendation(&mut self, recommendation: &Recommendation) {
        self.target = self.current;
        for (factor, level) in recommendation.targets.iter() {
            if level > self.current.get(factor) {
                self.set_target(factor, level);
            }
        }
    }

    /// Allocator output for rendering.
    #[must_use]
    pub fn snapshot(&self) -> BudgetSnapshot {
        BudgetSnapshot {
            current: self.current,
            target: self.target,
            remaining_budget: self.remaining_budget(),
        }
    }

    /// Payload for the external projection service.
    #[must_use]
    pub const fn projection_request(&self) -> ProjectionRequest {
        ProjectionRequest {
            driver_id: self.driver_id,
            target_skills: self.target,
        }
    }

    fn available_for(&self, factor: Factor) -> u8 {
        let others = Factor::ALL
            .into_iter()
            .filter(|other| *other != factor)
            .map(|other| self.increase(other))
            .fold(0, u8::saturating_add);
        MAX_TOTAL_INCREASE.saturating_sub(others)
    }
}

/// Wire form of [`SkillBudget`], validated before use.
#[derive(Debug, Deserialize)]
struct PersistedBudget {
    driver_id: u64,
    current: SkillLevels,
    target: SkillLevels,
}

impl TryFrom<PersistedBudget> for SkillBudget {
    type Error = BudgetStateError;

    fn try_from(raw: PersistedBudget) -> Result<Self, Self::Error> {
        let mut total: u16 = 0;
        for factor in Factor::ALL {
            let current = raw.current.get(factor);
            let target = raw.target.get(factor);
            if current > MAX_PERCENTILE {
                return Err(BudgetStateError::LevelOutOfRange {
                    side: "current",
                    factor,
                    value: current,
                });
            }
            if target > MAX_PERCENTILE {
                return Err(BudgetStateError::LevelOutOfRange {
                    side: "target",
                    factor,
                    value: target,
                });
            }
            if target < current {
                return Err(BudgetStateError::TargetBelowCurrent {
                    factor,
                    current,
                    target,
                });
            }
            total += u16::from(target - current);
        }
        if total > u16::from(MAX_TOTAL_INCREASE) {
            return Err(BudgetStateError::OverBudget {
                total,
                max: MAX_TOTAL_INCREASE,
            });
        }
        Ok(Self {
            driver_id: raw.driver_id,
            current: raw.current,
            target: raw.target,
        })
    }
}

#[cfg(test)]
mod tests;
