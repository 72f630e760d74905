//! Log filter selection.

use rstest::rstest;

use crate::logging::log_filter;

#[rstest]
#[case(None, "warn")]
#[case(Some(""), "warn")]
#[case(Some("  "), "warn")]
#[case(Some("gridscout=verbose"), "warn")]
#[case(Some("debug"), "debug")]
#[case(Some(" gridscout_budget=trace "), "gridscout_budget=trace")]
fn log_filter_defaults_to_warnings(#[case] spec: Option<&str>, #[case] expected: &str) {
    assert_eq!(log_filter(spec).to_string(), expected);
}
