//! End-to-end runs of each subcommand against temporary rosters.

use gridscout_core::{SortKey, SortOrder};
use rstest::{fixture, rstest};
use serde_json::json;

use super::helpers::{Workspace, at, capture, ids};
use crate::allocate::{AllocateConfig, parse_operations, run_allocate_with};
use crate::classify::{ClassifyConfig, run_classify_with};
use crate::list::{ListConfig, run_list_with};
use crate::recommend::{RecommendConfig, run_recommend_with};
use crate::{ARG_ROSTER, CliError};

#[fixture]
fn workspace() -> Workspace {
    Workspace::with_sample_roster()
}

fn list_config(workspace: &Workspace) -> ListConfig {
    ListConfig {
        roster: workspace.roster(),
        filters: None,
        search: None,
        sort: SortKey::default(),
        order: SortOrder::default(),
    }
}

fn allocate_config(workspace: &Workspace, driver: u64, ops: &str) -> AllocateConfig {
    AllocateConfig {
        roster: workspace.roster(),
        driver,
        state: None,
        operations: parse_operations(ops).expect("operations should parse"),
        recommended: false,
    }
}

#[rstest]
fn classify_emits_a_profile_per_driver(workspace: Workspace) {
    let config = ClassifyConfig {
        roster: workspace.roster(),
    };
    let output = capture(|writer| run_classify_with(&config, writer));
    assert_eq!(ids(&output, ""), vec![101, 102, 203, 204, 305, 306]);
    assert_eq!(at(&output, "/0/classification/id"), &json!("FRONTRUNNER"));
    assert_eq!(at(&output, "/0/classification/confidence"), &json!(95));
    assert_eq!(at(&output, "/3/classification/id"), &json!("DEVELOPMENT"));
    assert_eq!(at(&output, "/3/confidence/level"), &json!("LOW"));
}

#[rstest]
fn classify_reports_missing_roster(workspace: Workspace) {
    let config = ClassifyConfig {
        roster: workspace.path("absent.json"),
    };
    let mut sink = Vec::new();
    match run_classify_with(&config, &mut sink).expect_err("roster is missing") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_ROSTER),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn classify_rejects_a_directory_roster(workspace: Workspace) {
    let config = ClassifyConfig {
        roster: workspace.path(""),
    };
    let mut sink = Vec::new();
    match run_classify_with(&config, &mut sink).expect_err("roster is a directory") {
        CliError::SourcePathNotFile { field, .. } => assert_eq!(field, ARG_ROSTER),
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn classify_reports_malformed_roster(workspace: Workspace) {
    workspace.write("broken.json", "[{\"name\": \"no id\"}]");
    let config = ClassifyConfig {
        roster: workspace.path("broken.json"),
    };
    let mut sink = Vec::new();
    match run_classify_with(&config, &mut sink).expect_err("records need an id") {
        CliError::ParseInput { path, .. } => assert_eq!(path, workspace.path("broken.json")),
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[rstest]
fn list_without_filters_sorts_by_overall_descending(workspace: Workspace) {
    let config = list_config(&workspace);
    let output = capture(|writer| run_list_with(&config, writer));
    assert_eq!(ids(&output, "/drivers"), vec![101, 102, 305, 203, 306, 204]);
    assert_eq!(at(&output, "/total"), &json!(6));
    assert_eq!(at(&output, "/active_filters"), &json!(0));
    assert_eq!(
        at(&output, "/tiers"),
        &json!([
            { "tier": "FRONTRUNNER", "count": 1 },
            { "tier": "CONTENDER", "count": 3 },
            { "tier": "MID_PACK", "count": 1 },
            { "tier": "DEVELOPMENT", "count": 1 },
        ])
    );
}

#[rstest]
fn list_applies_saved_filters_and_sort(workspace: Workspace) {
    workspace.write("filters.json", r#"{ "tiers": ["CONTENDER"] }"#);
    let config = ListConfig {
        filters: Some(workspace.path("filters.json")),
        sort: SortKey::Races,
        order: SortOrder::Asc,
        ..list_config(&workspace)
    };
    let output = capture(|writer| run_list_with(&config, writer));
    assert_eq!(ids(&output, "/drivers"), vec![102, 306, 305]);
    assert_eq!(at(&output, "/active_filters"), &json!(1));
    assert_eq!(at(&output, "/tiers/1/count"), &json!(3));
    assert_eq!(at(&output, "/tiers/0/count"), &json!(0));
}

#[rstest]
fn list_search_overrides_saved_search(workspace: Workspace) {
    workspace.write("filters.json", r#"{ "search": "voss" }"#);
    let config = ListConfig {
        filters: Some(workspace.path("filters.json")),
        search: Some("PARK".to_owned()),
        ..list_config(&workspace)
    };
    let output = capture(|writer| run_list_with(&config, writer));
    assert_eq!(ids(&output, "/drivers"), vec![102]);
}

#[rstest]
fn list_reports_missing_filter_file(workspace: Workspace) {
    let config = ListConfig {
        filters: Some(workspace.path("filters.json")),
        ..list_config(&workspace)
    };
    let mut sink = Vec::new();
    match run_list_with(&config, &mut sink).expect_err("filters are missing") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, "filters"),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn recommend_seeds_the_weakest_factors(workspace: Workspace) {
    let config = RecommendConfig {
        roster: workspace.roster(),
        driver: 204,
    };
    let output = capture(|writer| run_recommend_with(&config, writer));
    assert_eq!(at(&output, "/name"), &json!("Tomas Lindqvist"));
    assert_eq!(at(&output, "/recommendation/weakest"), &json!("consistency"));
    assert_eq!(
        at(&output, "/snapshot/target"),
        &json!({ "speed": 33, "consistency": 25, "racecraft": 35, "tire_management": 40 })
    );
    assert_eq!(at(&output, "/snapshot/remaining_budget"), &json!(0));
    let reasoning = at(&output, "/recommendation/reasoning")
        .as_str()
        .expect("reasoning text");
    assert!(reasoning.contains("percentile 22"), "{reasoning}");
}

#[rstest]
fn repeated_driver_ids_resolve_to_the_first_record(workspace: Workspace) {
    workspace.write(
        "repeated.json",
        r#"[{ "id": 7, "name": "First Entry" }, { "id": 7, "name": "Second Entry" }]"#,
    );
    let config = RecommendConfig {
        roster: workspace.path("repeated.json"),
        driver: 7,
    };
    let output = capture(|writer| run_recommend_with(&config, writer));
    assert_eq!(at(&output, "/name"), &json!("First Entry"));
}

#[rstest]
fn recommend_reports_unknown_driver(workspace: Workspace) {
    let config = RecommendConfig {
        roster: workspace.roster(),
        driver: 999,
    };
    let mut sink = Vec::new();
    match run_recommend_with(&config, &mut sink).expect_err("driver is unknown") {
        CliError::UnknownDriver { id, .. } => assert_eq!(id, 999),
        other => panic!("expected UnknownDriver, found {other:?}"),
    }
}

#[rstest]
fn allocate_reports_each_outcome(workspace: Workspace) {
    let config = allocate_config(
        &workspace,
        101,
        "inc:speed,inc:speed,set:tire_management=80,dec:speed",
    );
    let output = capture(|writer| run_allocate_with(&config, writer));
    assert_eq!(
        at(&output, "/applied"),
        &json!([
            { "operation": "inc:speed", "outcome": "committed", "value": 89 },
            { "operation": "inc:speed", "outcome": "committed", "value": 90 },
            {
                "operation": "set:tire_management=80",
                "outcome": "clamped",
                "requested": 80,
                "value": 72
            },
            { "operation": "dec:speed", "outcome": "committed", "value": 89 },
        ])
    );
    assert_eq!(at(&output, "/snapshot/remaining_budget"), &json!(1));
    assert_eq!(at(&output, "/projection/driver_id"), &json!(101));
    assert_eq!(
        at(&output, "/projection/target_skills"),
        &json!({ "speed": 89, "consistency": 74, "racecraft": 81, "tire_management": 72 })
    );
}

#[rstest]
fn allocate_refuses_to_overspend(workspace: Workspace) {
    let config = allocate_config(&workspace, 203, "set:speed=69,inc:consistency");
    let output = capture(|writer| run_allocate_with(&config, writer));
    assert_eq!(at(&output, "/applied/1/outcome"), &json!("unchanged"));
    assert_eq!(at(&output, "/snapshot/target/consistency"), &json!(61));
    assert_eq!(at(&output, "/snapshot/remaining_budget"), &json!(0));
}

#[rstest]
fn allocate_saturates_oversized_levels(workspace: Workspace) {
    let config = allocate_config(&workspace, 101, "set:speed=300");
    let output = capture(|writer| run_allocate_with(&config, writer));
    assert_eq!(
        at(&output, "/applied/0"),
        &json!({
            "operation": "set:speed=255",
            "outcome": "clamped",
            "requested": 255,
            "value": 93
        })
    );
    assert_eq!(at(&output, "/snapshot/remaining_budget"), &json!(0));
}

#[rstest]
fn allocate_persists_state_between_runs(workspace: Workspace) {
    let state = workspace.path("state/allocation.json");
    let config = AllocateConfig {
        state: Some(state.clone()),
        ..allocate_config(&workspace, 101, "inc:racecraft")
    };
    capture(|writer| run_allocate_with(&config, writer));
    let output = capture(|writer| run_allocate_with(&config, writer));
    assert_eq!(at(&output, "/snapshot/target/racecraft"), &json!(83));
    assert_eq!(at(&output, "/snapshot/remaining_budget"), &json!(3));

    let saved = workspace.read_json("state/allocation.json");
    assert_eq!(at(&saved, "/driver_id"), &json!(101));
    assert_eq!(at(&saved, "/target/racecraft"), &json!(83));
}

#[rstest]
fn allocate_discards_state_for_another_driver(workspace: Workspace) {
    let state = workspace.path("allocation.json");
    let first = AllocateConfig {
        state: Some(state.clone()),
        ..allocate_config(&workspace, 101, "inc:racecraft")
    };
    capture(|writer| run_allocate_with(&first, writer));

    let second = AllocateConfig {
        state: Some(state),
        ..allocate_config(&workspace, 102, "")
    };
    let output = capture(|writer| run_allocate_with(&second, writer));
    assert_eq!(at(&output, "/snapshot/remaining_budget"), &json!(5));
    assert_eq!(at(&workspace.read_json("allocation.json"), "/driver_id"), &json!(102));
}

#[rstest]
fn allocate_rejects_an_invalid_saved_state(workspace: Workspace) {
    workspace.write(
        "allocation.json",
        &json!({
            "driver_id": 101,
            "current": { "speed": 88, "consistency": 74, "racecraft": 81, "tire_management": 69 },
            "target": { "speed": 95, "consistency": 74, "racecraft": 81, "tire_management": 69 },
        })
        .to_string(),
    );
    let config = AllocateConfig {
        state: Some(workspace.path("allocation.json")),
        ..allocate_config(&workspace, 101, "")
    };
    let mut sink = Vec::new();
    match run_allocate_with(&config, &mut sink).expect_err("state overspends the budget") {
        CliError::ParseInput { source, .. } => {
            assert!(source.to_string().contains("budget is 5"), "{source}");
        }
        other => panic!("expected ParseInput, found {other:?}"),
    }
}

#[rstest]
fn allocate_starts_from_the_recommendation(workspace: Workspace) {
    let config = AllocateConfig {
        recommended: true,
        ..allocate_config(&workspace, 204, "dec:consistency,reset")
    };
    let output = capture(|writer| run_allocate_with(&config, writer));
    assert_eq!(
        at(&output, "/applied/0"),
        &json!({ "operation": "dec:consistency", "outcome": "committed", "value": 24 })
    );
    assert_eq!(
        at(&output, "/applied/1"),
        &json!({ "operation": "reset", "outcome": "reset" })
    );
    assert_eq!(at(&output, "/snapshot/remaining_budget"), &json!(5));
}
