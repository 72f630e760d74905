//! `classify` command: tier, tags and data confidence for every driver.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use gridscout_core::DriverProfile;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::Roster;
use crate::output::{with_stdout, write_json};
use crate::{ARG_ROSTER, CliError, ENV_CLASSIFY_ROSTER};

/// CLI arguments for the `classify` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "classify",
    about = "Classify every driver in a roster",
    long_about = "Emit one profile per roster entry with its tier, tags and \
                  data-confidence band, in roster order."
)]
#[ortho_config(prefix = "GRIDSCOUT")]
pub(crate) struct ClassifyArgs {
    /// Path to a JSON array of performance records.
    #[arg(long = ARG_ROSTER, value_name = "path")]
    #[serde(default)]
    pub(crate) roster: Option<Utf8PathBuf>,
}

impl ClassifyArgs {
    fn into_config(self) -> Result<ClassifyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ClassifyConfig::try_from(merged)
    }
}

/// Resolved `classify` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ClassifyConfig {
    pub(crate) roster: Utf8PathBuf,
}

impl TryFrom<ClassifyArgs> for ClassifyConfig {
    type Error = CliError;

    fn try_from(args: ClassifyArgs) -> Result<Self, Self::Error> {
        let roster = args.roster.ok_or(CliError::MissingArgument {
            field: ARG_ROSTER,
            env: ENV_CLASSIFY_ROSTER,
        })?;
        Ok(Self { roster })
    }
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    with_stdout(|writer| run_classify_with(&config, writer))
}

pub(crate) fn run_classify_with(
    config: &ClassifyConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let roster = Roster::load(&config.roster)?;
    let profiles: Vec<DriverProfile> = roster
        .records
        .iter()
        .map(DriverProfile::from_record)
        .collect();
    write_json(writer, &profiles)
}
