//! One-shot recommended allocation that targets the weakest factors first.

use gridscout_core::Factor;
use serde::Serialize;

use crate::{MAX_PERCENTILE, MAX_TOTAL_INCREASE, SkillLevels};

/// Percentile below which the weakest factor receives the larger share.
pub const DEEP_WEAKNESS_PERCENTILE: u8 = 40;

/// Points granted to a weakest factor below [`DEEP_WEAKNESS_PERCENTILE`].
pub const DEEP_WEAKNESS_POINTS: u8 = 3;

/// Points granted to the weakest factor otherwise.
pub const WEAKNESS_POINTS: u8 = 2;

/// Most points the second-weakest factor receives.
pub const SECOND_WEAKEST_POINTS: u8 = 2;

/// A proposed starting allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// Points proposed per factor.
    pub increases: SkillLevels,
    /// Resulting target levels.
    pub targets: SkillLevels,
    /// The factor with the lowest current percentile.
    pub weakest: Factor,
    /// Human-readable explanation naming the weakest factor.
    pub reasoning: String,
}

impl Recommendation {
    /// Points proposed across all factors.
    #[must_use]
    pub fn total_increase(&self) -> u8 {
        self.increases
            .iter()
            .map(|(_, points)| points)
            .fold(0, u8::saturating_add)
    }
}

/// Propose an allocation of the budget for `current`.
///
/// Factors are ranked by percentile, weakest first, with ties kept in
/// canonical factor order. The weakest gets three points when below the 40th
/// percentile and two otherwise, the second-weakest up to two, the
/// third-weakest whatever is left and the strongest nothing. No factor is
/// raised past 100, so the result is always a valid allocator target.
///
/// # Examples
/// ```
/// use gridscout_budget::{SkillLevels, recommend_allocation};
/// use gridscout_core::Factor;
///
/// let rec = recommend_allocation(SkillLevels::new(80, 35, 60, 50));
/// assert_eq!(rec.weakest, Factor::Consistency);
/// assert_eq!(rec.increases, SkillLevels::new(0, 3, 0, 2));
/// assert_eq!(rec.targets, SkillLevels::new(80, 38, 60, 52));
/// ```
#[must_use]
pub fn recommend_allocation(current: SkillLevels) -> Recommendation {
    let mut ranked = Factor::ALL;
    ranked.sort_by_key(|factor| current.get(*factor));
    let [weakest, second, third, _] = ranked;

    let weakest_level = current.get(weakest);
    let weakest_share = if weakest_level < DEEP_WEAKNESS_PERCENTILE {
        DEEP_WEAKNESS_POINTS
    } else {
        WEAKNESS_POINTS
    };

    let mut plan = Plan::new(current);
    plan.grant(weakest, weakest_share);
    plan.grant(second, SECOND_WEAKEST_POINTS);
    plan.grant(third, MAX_TOTAL_INCREASE);

    let reasoning = format!(
        "{} is the weakest factor at percentile {weakest_level}; the budget goes there first, \
         then to {} and {}.",
        weakest.label(),
        second.label(),
        third.label()
    );
    log::debug!(
        "recommended +{} points, weakest factor {weakest} at {weakest_level}",
        MAX_TOTAL_INCREASE.saturating_sub(plan.remaining)
    );
    Recommendation {
        increases: plan.increases,
        targets: plan.targets,
        weakest,
        reasoning,
    }
}

struct Plan {
    targets: SkillLevels,
    increases: SkillLevels,
    remaining: u8,
}

impl Plan {
    const fn new(current: SkillLevels) -> Self {
        Self {
            targets: current,
            increases: SkillLevels::uniform(0),
            remaining: MAX_TOTAL_INCREASE,
        }
    }

    fn grant(&mut self, factor: Factor, wanted: u8) {
        let level = self.targets.get(factor);
        let points = wanted
            .min(self.remaining)
            .min(MAX_PERCENTILE.saturating_sub(level));
        self.targets.set(factor, level.saturating_add(points));
        self.increases.set(factor, points);
        self.remaining = self.remaining.saturating_sub(points);
    }
}
