//! Command-line interface for the gridscout driver engine.
//!
//! Each subcommand reads a JSON roster of performance records, runs the
//! engine over it and prints a JSON document to standard output. Options
//! are layered by `ortho_config`: defaults, then configuration files, then
//! `GRIDSCOUT_CMDS_<SUBCOMMAND>_*` environment variables, then flags.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod allocate;
mod classify;
mod error;
mod input;
mod list;
mod logging;
mod output;
mod recommend;

pub use error::CliError;
pub use logging::{LOG_ENV, init_logging};

use allocate::AllocateArgs;
use classify::ClassifyArgs;
use list::ListArgs;
use recommend::RecommendArgs;

pub(crate) const ARG_ROSTER: &str = "roster";
pub(crate) const ARG_FILTERS: &str = "filters";
pub(crate) const ARG_SEARCH: &str = "search";
pub(crate) const ARG_SORT: &str = "sort";
pub(crate) const ARG_ORDER: &str = "order";
pub(crate) const ARG_DRIVER: &str = "driver";
pub(crate) const ARG_STATE: &str = "state";
pub(crate) const ARG_OPS: &str = "ops";
pub(crate) const ARG_RECOMMENDED: &str = "recommended";

pub(crate) const ENV_CLASSIFY_ROSTER: &str = "GRIDSCOUT_CMDS_CLASSIFY_ROSTER";
pub(crate) const ENV_LIST_ROSTER: &str = "GRIDSCOUT_CMDS_LIST_ROSTER";
pub(crate) const ENV_RECOMMEND_ROSTER: &str = "GRIDSCOUT_CMDS_RECOMMEND_ROSTER";
pub(crate) const ENV_RECOMMEND_DRIVER: &str = "GRIDSCOUT_CMDS_RECOMMEND_DRIVER";
pub(crate) const ENV_ALLOCATE_ROSTER: &str = "GRIDSCOUT_CMDS_ALLOCATE_ROSTER";
pub(crate) const ENV_ALLOCATE_DRIVER: &str = "GRIDSCOUT_CMDS_ALLOCATE_DRIVER";

/// Run the gridscout CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when arguments or configuration are invalid, when
/// an input cannot be read or decoded, or when output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    match cli.command {
        Command::Classify(args) => classify::run_classify(args),
        Command::List(args) => list::run_list(args),
        Command::Recommend(args) => recommend::run_recommend(args),
        Command::Allocate(args) => allocate::run_allocate(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "gridscout",
    about = "Classify, filter and plan skill investment for a driver roster",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify every driver in a roster.
    Classify(ClassifyArgs),
    /// Filter and sort a roster.
    List(ListArgs),
    /// Recommend how to spend a driver's skill budget.
    Recommend(RecommendArgs),
    /// Apply skill-budget operations for one driver.
    Allocate(AllocateArgs),
}

#[cfg(test)]
mod tests;
