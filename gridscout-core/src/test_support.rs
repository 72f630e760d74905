//! Sample roster shared by unit, behaviour and downstream crate tests.

use crate::{Factor, FactorScore, PerformanceRecord};

/// Build a record with all four factor percentiles (scores mirror them).
#[must_use]
pub fn driver(
    id: u64,
    name: &str,
    overall: f64,
    races: u32,
    percentiles: [f64; 4],
) -> PerformanceRecord {
    Factor::ALL.into_iter().zip(percentiles).fold(
        PerformanceRecord::new(id, name)
            .with_overall(overall)
            .with_races(races),
        |record, (factor, percentile)| {
            record.with_factor(factor, FactorScore::new(percentile, percentile))
        },
    )
}

/// Six drivers spanning every tier, band and tag.
///
/// | id  | name            | tier        | band       |
/// |-----|-----------------|-------------|------------|
/// | 101 | Mara Voss       | FRONTRUNNER | veteran    |
/// | 102 | Jun Park        | CONTENDER   | rookie     |
/// | 203 | Ines Duarte     | MID_PACK    | developing |
/// | 204 | Tomas Lindqvist | DEVELOPMENT | rookie     |
/// | 305 | Priya Nair      | CONTENDER   | veteran    |
/// | 306 | Luca Bianchi    | CONTENDER   | developing |
///
/// Tomas Lindqvist has no average finish on record.
#[must_use]
pub fn sample_roster() -> Vec<PerformanceRecord> {
    vec![
        driver(101, "Mara Voss", 67.0, 12, [88.0, 74.0, 81.0, 69.0]).with_avg_finish(2.75),
        driver(102, "Jun Park", 62.0, 3, [70.0, 45.0, 52.0, 38.0]).with_avg_finish(4.0),
        driver(203, "Ines Duarte", 55.0, 7, [64.0, 61.0, 48.0, 57.0]).with_avg_finish(8.5),
        driver(204, "Tomas Lindqvist", 44.0, 2, [31.0, 22.0, 35.0, 40.0]),
        driver(305, "Priya Nair", 61.0, 15, [58.0, 66.0, 63.0, 72.0]).with_avg_finish(6.2),
        driver(306, "Luca Bianchi", 48.0, 5, [77.0, 35.0, 41.0, 29.0]).with_avg_finish(11.0),
    ]
}
