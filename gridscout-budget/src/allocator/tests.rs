//! Unit tests for the skill-budget allocator.

use super::*;
use gridscout_core::test_support::driver;
use rstest::{fixture, rstest};

#[fixture]
fn even() -> SkillBudget {
    SkillBudget::new(7, SkillLevels::uniform(50))
}

#[rstest]
fn five_increments_exhaust_the_budget(mut even: SkillBudget) {
    for _ in 0..5 {
        assert!(even.increment(Factor::Speed).is_committed());
    }
    assert_eq!(even.target().get(Factor::Speed), 55);
    assert_eq!(even.remaining_budget(), 0);

    let before = even.clone();
    assert_eq!(even.increment(Factor::Consistency), TargetChange::Unchanged);
    assert_eq!(even, before);
}

#[rstest]
fn proposals_below_current_are_ignored(mut even: SkillBudget) {
    assert_eq!(even.set_target(Factor::Racecraft, 49), TargetChange::Unchanged);
    assert_eq!(even.target(), even.current());
}

#[rstest]
fn proposal_at_current_target_is_a_no_op(mut even: SkillBudget) {
    assert_eq!(even.set_target(Factor::Racecraft, 50), TargetChange::Unchanged);
    assert_eq!(even.set_target(Factor::Racecraft, 52), TargetChange::Committed { value: 52 });

    let before = even.clone();
    assert_eq!(even.set_target(Factor::Racecraft, 52), TargetChange::Unchanged);
    assert_eq!(even, before);
}

#[rstest]
fn capped_proposal_at_the_ceiling_is_a_no_op() {
    let mut budget = SkillBudget::new(1, SkillLevels::uniform(100));
    let before = budget.clone();
    assert_eq!(budget.set_target(Factor::Speed, 150), TargetChange::Unchanged);
    assert_eq!(budget, before);
    assert_eq!(budget.remaining_budget(), MAX_TOTAL_INCREASE);
}

#[rstest]
fn oversized_proposal_is_clamped_to_what_remains(mut even: SkillBudget) {
    even.set_target(Factor::Speed, 52);
    assert_eq!(
        even.set_target(Factor::Consistency, 60),
        TargetChange::Clamped {
            requested: 60,
            value: 53
        }
    );
    assert_eq!(even.remaining_budget(), 0);
}

#[rstest]
fn raising_a_committed_target_counts_only_the_other_factors(mut even: SkillBudget) {
    even.set_target(Factor::Speed, 53);
    even.set_target(Factor::Consistency, 52);
    assert_eq!(even.set_target(Factor::Speed, 60), TargetChange::Unchanged);
    assert_eq!(even.target().get(Factor::Speed), 53);
    assert_eq!(
        even.set_target(Factor::Consistency, 51),
        TargetChange::Committed { value: 51 }
    );
    assert_eq!(
        even.set_target(Factor::Speed, 60),
        TargetChange::Clamped {
            requested: 60,
            value: 54
        }
    );
    assert_eq!(even.remaining_budget(), 0);
}

#[rstest]
fn targets_never_exceed_one_hundred() {
    let mut budget = SkillBudget::new(1, SkillLevels::new(98, 10, 10, 10));
    assert_eq!(
        budget.set_target(Factor::Speed, 120),
        TargetChange::Clamped {
            requested: 120,
            value: 100
        }
    );
    assert_eq!(budget.increment(Factor::Speed), TargetChange::Unchanged);
    assert_eq!(budget.remaining_budget(), 3);
}

#[rstest]
fn decrement_stops_at_current(mut even: SkillBudget) {
    even.increment(Factor::TireManagement);
    assert_eq!(
        even.decrement(Factor::TireManagement),
        TargetChange::Committed { value: 50 }
    );
    assert_eq!(even.decrement(Factor::TireManagement), TargetChange::Unchanged);
    assert_eq!(even.target().get(Factor::TireManagement), 50);
}

#[rstest]
fn decrement_frees_budget_for_other_factors(mut even: SkillBudget) {
    even.set_target(Factor::Speed, 55);
    even.decrement(Factor::Speed);
    assert_eq!(
        even.increment(Factor::Racecraft),
        TargetChange::Committed { value: 51 }
    );
    assert_eq!(even.remaining_budget(), 0);
}

#[rstest]
fn new_caps_current_levels() {
    let budget = SkillBudget::new(3, SkillLevels::new(120, 0, 100, 5));
    assert_eq!(budget.current(), SkillLevels::new(100, 0, 100, 5));
}

#[rstest]
fn reset_restores_the_full_budget(mut even: SkillBudget) {
    even.set_target(Factor::Speed, 55);
    let record = driver(9, "Ines Duarte", 55.0, 7, [64.0, 61.4, 48.6, 57.0]);
    even.reset(&record);
    assert_eq!(even.driver_id(), 9);
    assert_eq!(even.current(), SkillLevels::new(64, 61, 49, 57));
    assert_eq!(even.target(), even.current());
    assert_eq!(even.remaining_budget(), MAX_TOTAL_INCREASE);
}

#[rstest]
fn sync_keeps_state_for_the_same_snapshot() {
    let record = driver(11, "Jun Park", 62.0, 3, [70.0, 45.0, 52.0, 38.0]);
    let mut budget = SkillBudget::from_record(&record);
    budget.increment(Factor::TireManagement);
    assert!(!budget.sync_with(&record));
    assert_eq!(budget.increase(Factor::TireManagement), 1);
}

#[rstest]
#[case::other_driver(driver(12, "Jun Park", 62.0, 3, [70.0, 45.0, 52.0, 38.0]))]
#[case::moved_percentiles(driver(11, "Jun Park", 62.0, 4, [71.0, 45.0, 52.0, 38.0]))]
fn sync_resets_when_the_record_changes(#[case] next: PerformanceRecord) {
    let record = driver(11, "Jun Park", 62.0, 3, [70.0, 45.0, 52.0, 38.0]);
    let mut budget = SkillBudget::from_record(&record);
    budget.increment(Factor::TireManagement);
    assert!(budget.sync_with(&next));
    assert_eq!(budget.remaining_budget(), MAX_TOTAL_INCREASE);
    assert_eq!(budget.driver_id(), next.id);
}

#[rstest]
fn recommended_seeds_targets_within_budget() {
    let record = driver(204, "Tomas Lindqvist", 44.0, 2, [31.0, 22.0, 35.0, 40.0]);
    let (budget, recommendation) = SkillBudget::recommended(&record);
    assert_eq!(budget.target(), recommendation.targets);
    assert_eq!(budget.target(), SkillLevels::new(33, 25, 35, 40));
    assert_eq!(budget.remaining_budget(), 0);
}

#[rstest]
fn snapshot_and_projection_reflect_state(mut even: SkillBudget) {
    even.set_target(Factor::Consistency, 52);
    let snapshot = even.snapshot();
    assert_eq!(snapshot.current, SkillLevels::uniform(50));
    assert_eq!(snapshot.target, SkillLevels::new(50, 52, 50, 50));
    assert_eq!(snapshot.remaining_budget, 3);

    let request = even.projection_request();
    assert_eq!(request.driver_id, 7);
    assert_eq!(request.target_skills, snapshot.target);
}

#[rstest]
fn snapshot_serialises_allocator_output(even: SkillBudget) {
    let json = serde_json::to_value(even.snapshot()).expect("serialise snapshot");
    assert_eq!(json.pointer("/remaining_budget"), Some(&serde_json::json!(5)));
    assert_eq!(
        json.pointer("/target/tire_management"),
        Some(&serde_json::json!(50))
    );
}

#[rstest]
fn valid_state_survives_a_round_trip(mut even: SkillBudget) {
    even.set_target(Factor::Racecraft, 54);
    let json = serde_json::to_string(&even).expect("serialise budget");
    let restored: SkillBudget = serde_json::from_str(&json).expect("restore budget");
    assert_eq!(restored, even);
}

fn levels(speed: u8) -> serde_json::Value {
    serde_json::json!({
        "speed": speed,
        "consistency": 50,
        "racecraft": 50,
        "tire_management": 50,
    })
}

#[rstest]
#[case::target_below_current(levels(50), levels(49), "below the current level")]
#[case::over_budget(levels(50), levels(56), "budget is 5")]
#[case::target_above_cap(levels(98), levels(101), "target speed level 101 exceeds 100")]
#[case::current_above_cap(levels(101), levels(101), "current speed level 101 exceeds 100")]
fn invalid_state_is_rejected(
    #[case] current: serde_json::Value,
    #[case] target: serde_json::Value,
    #[case] message: &str,
) {
    let raw = serde_json::json!({ "driver_id": 1, "current": current, "target": target });
    let err = serde_json::from_value::<SkillBudget>(raw).expect_err("state should be rejected");
    assert!(err.to_string().contains(message), "unexpected error: {err}");
}
