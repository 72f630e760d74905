//! Unit tests for the classification table.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn frontrunner() -> PerformanceRecord {
    PerformanceRecord::new(11, "Mara Voss")
        .with_overall(67.0)
        .with_races(12)
        .with_avg_finish(2.75)
}

#[rstest]
fn proven_winner_is_frontrunner(frontrunner: PerformanceRecord) {
    let classification = classify(&frontrunner);
    assert_eq!(classification.tier, Tier::Frontrunner);
    assert_eq!(classification.confidence, 95);
    assert_eq!(classification.reasoning, Reasoning::ProvenTrackRecord);
}

#[rstest]
fn frontrunner_wins_over_lower_rules(frontrunner: PerformanceRecord) {
    // Also satisfies both contender clauses and the mid-pack rule.
    let record = frontrunner.with_percentile(Factor::Speed, 95.0);
    assert!(CLASSIFICATION_RULES.iter().all(|rule| rule.matches(&record)));
    assert_eq!(classify(&record).tier, Tier::Frontrunner);
}

#[rstest]
fn classification_is_repeatable(frontrunner: PerformanceRecord) {
    assert_eq!(classify(&frontrunner), classify(&frontrunner));
}

#[rstest]
#[case(64.9, 12, 2.0)]
#[case(67.0, 9, 2.0)]
#[case(67.0, 12, 5.0)]
fn near_misses_fall_to_contender(#[case] overall: f64, #[case] races: u32, #[case] finish: f64) {
    let record = PerformanceRecord::new(1, "A")
        .with_overall(overall)
        .with_races(races)
        .with_avg_finish(finish);
    assert_eq!(classify(&record).tier, Tier::Contender);
}

#[rstest]
fn short_career_speed_phenom_is_contender() {
    let record = PerformanceRecord::new(2, "Jun Park")
        .with_overall(62.0)
        .with_races(3)
        .with_percentile(Factor::Speed, 70.0);
    let classification = classify(&record);
    assert_eq!(classification.tier, Tier::Contender);
    assert_eq!(classification.confidence, 85);
    assert!(classification.reasoning.text().contains("elite raw speed"));
}

#[rstest]
fn low_overall_phenom_still_reaches_contender() {
    let record = PerformanceRecord::new(3, "B")
        .with_overall(41.0)
        .with_races(6)
        .with_percentile(Factor::Speed, 88.0);
    let classification = classify(&record);
    assert_eq!(classification.tier, Tier::Contender);
    assert_eq!(classification.reasoning, Reasoning::EliteRawSpeed);
}

#[rstest]
fn experienced_contender_reports_podium_wording() {
    let record = PerformanceRecord::new(4, "C")
        .with_overall(61.0)
        .with_races(7)
        .with_percentile(Factor::Speed, 90.0);
    let classification = classify(&record);
    assert_eq!(classification.tier, Tier::Contender);
    assert_eq!(classification.reasoning, Reasoning::PodiumConsistency);
}

#[rstest]
fn fast_seven_race_driver_is_not_a_phenom() {
    let record = PerformanceRecord::new(5, "D")
        .with_overall(52.0)
        .with_races(7)
        .with_percentile(Factor::Speed, 99.0);
    assert_eq!(classify(&record).tier, Tier::MidPack);
}

#[rstest]
#[case(50.0, Tier::MidPack, 80, Reasoning::PointsScoring)]
#[case(59.9, Tier::MidPack, 80, Reasoning::PointsScoring)]
#[case(49.9, Tier::Development, 70, Reasoning::StructuredProgram)]
#[case(0.0, Tier::Development, 70, Reasoning::StructuredProgram)]
fn lower_tiers_follow_overall_score(
    #[case] overall: f64,
    #[case] tier: Tier,
    #[case] confidence: u8,
    #[case] reasoning: Reasoning,
) {
    let record = PerformanceRecord::new(6, "E")
        .with_overall(overall)
        .with_races(8);
    let classification = classify(&record);
    assert_eq!(classification.tier, tier);
    assert_eq!(classification.confidence, confidence);
    assert_eq!(classification.reasoning, reasoning);
}

#[rstest]
fn empty_record_is_development() {
    let classification = classify(&PerformanceRecord::new(7, ""));
    assert_eq!(classification.tier, Tier::Development);
}

#[rstest]
fn rules_are_listed_highest_tier_first() {
    let tiers: Vec<Tier> = CLASSIFICATION_RULES.iter().map(ClassificationRule::tier).collect();
    assert_eq!(tiers, Tier::ALL.to_vec());
    let confidences: Vec<u8> = CLASSIFICATION_RULES
        .iter()
        .map(ClassificationRule::confidence)
        .collect();
    assert_eq!(confidences, vec![95, 85, 80, 70]);
}

#[rstest]
fn classification_serialises_display_identity(frontrunner: PerformanceRecord) {
    let value = serde_json::to_value(classify(&frontrunner)).expect("serialise classification");
    assert_eq!(value["id"], "FRONTRUNNER");
    assert_eq!(value["label"], "Frontrunner");
    assert_eq!(value["bgColor"], "#FEF3C7");
    assert_eq!(value["confidence"], 95);
    assert_eq!(value["reasoning"], Reasoning::ProvenTrackRecord.text());
}

#[rstest]
#[case("FRONTRUNNER", Tier::Frontrunner)]
#[case("contender", Tier::Contender)]
#[case("Mid_Pack", Tier::MidPack)]
#[case("development", Tier::Development)]
fn tier_ids_parse(#[case] raw: &str, #[case] expected: Tier) {
    assert_eq!(raw.parse::<Tier>(), Ok(expected));
    assert_eq!(expected.to_string().parse::<Tier>(), Ok(expected));
}
