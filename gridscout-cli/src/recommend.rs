//! `recommend` command: a starting allocation for one driver.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use gridscout_budget::{BudgetSnapshot, Recommendation, SkillBudget};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::Roster;
use crate::output::{with_stdout, write_json};
use crate::{ARG_DRIVER, ARG_ROSTER, CliError, ENV_RECOMMEND_DRIVER, ENV_RECOMMEND_ROSTER};

/// CLI arguments for the `recommend` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "recommend",
    about = "Recommend how to spend a driver's skill budget"
)]
#[ortho_config(prefix = "GRIDSCOUT")]
pub(crate) struct RecommendArgs {
    /// Path to a JSON array of performance records.
    #[arg(long = ARG_ROSTER, value_name = "path")]
    #[serde(default)]
    pub(crate) roster: Option<Utf8PathBuf>,
    /// Identifier of the driver to plan for.
    #[arg(long = ARG_DRIVER, value_name = "id")]
    #[serde(default)]
    pub(crate) driver: Option<u64>,
}

impl RecommendArgs {
    fn into_config(self) -> Result<RecommendConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RecommendConfig::try_from(merged)
    }
}

/// Resolved `recommend` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecommendConfig {
    pub(crate) roster: Utf8PathBuf,
    pub(crate) driver: u64,
}

impl TryFrom<RecommendArgs> for RecommendConfig {
    type Error = CliError;

    fn try_from(args: RecommendArgs) -> Result<Self, Self::Error> {
        let roster = args.roster.ok_or(CliError::MissingArgument {
            field: ARG_ROSTER,
            env: ENV_RECOMMEND_ROSTER,
        })?;
        let driver = args.driver.ok_or(CliError::MissingArgument {
            field: ARG_DRIVER,
            env: ENV_RECOMMEND_DRIVER,
        })?;
        Ok(Self { roster, driver })
    }
}

#[derive(Debug, Serialize)]
struct RecommendOutput<'a> {
    driver_id: u64,
    name: &'a str,
    recommendation: Recommendation,
    snapshot: BudgetSnapshot,
}

pub(crate) fn run_recommend(args: RecommendArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    with_stdout(|writer| run_recommend_with(&config, writer))
}

pub(crate) fn run_recommend_with(
    config: &RecommendConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let roster = Roster::load(&config.roster)?;
    let record = roster.driver(config.driver)?;
    let (budget, recommendation) = SkillBudget::recommended(record);
    let output = RecommendOutput {
        driver_id: record.id,
        name: &record.name,
        recommendation,
        snapshot: budget.snapshot(),
    };
    write_json(writer, &output)
}
