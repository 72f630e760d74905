//! `allocate` command: apply skill-budget operations for one driver.
//!
//! Operations are written as a comma-separated list, applied in order:
//! `inc:<factor>`, `dec:<factor>`, `set:<factor>=<level>` and `reset`.
//! Levels above 255 saturate to 255 before the allocator caps them.

use std::io::Write;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use gridscout_budget::{BudgetSnapshot, ProjectionRequest, SkillBudget, TargetChange};
use gridscout_core::{Factor, PerformanceRecord};
use gridscout_fs::PathKind;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{Roster, load_json};
use crate::output::{with_stdout, write_json};
use crate::{
    ARG_DRIVER, ARG_OPS, ARG_RECOMMENDED, ARG_ROSTER, ARG_STATE, CliError, ENV_ALLOCATE_DRIVER,
    ENV_ALLOCATE_ROSTER,
};

/// CLI arguments for the `allocate` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "allocate",
    about = "Apply skill-budget operations for one driver",
    long_about = "Restore or start a skill-budget allocation for a driver, \
                  apply operations in order and emit the resulting snapshot \
                  together with the projection request payload. When --state \
                  is given the allocation is read from and written back to \
                  that file."
)]
#[ortho_config(prefix = "GRIDSCOUT")]
pub(crate) struct AllocateArgs {
    /// Path to a JSON array of performance records.
    #[arg(long = ARG_ROSTER, value_name = "path")]
    #[serde(default)]
    pub(crate) roster: Option<Utf8PathBuf>,
    /// Identifier of the driver to allocate for.
    #[arg(long = ARG_DRIVER, value_name = "id")]
    #[serde(default)]
    pub(crate) driver: Option<u64>,
    /// Path of the persisted allocation.
    #[arg(long = ARG_STATE, value_name = "path")]
    #[serde(default)]
    pub(crate) state: Option<Utf8PathBuf>,
    /// Comma-separated operations, e.g. `inc:speed,set:racecraft=60`.
    #[arg(long = ARG_OPS, value_name = "list")]
    #[serde(default)]
    pub(crate) ops: Option<String>,
    /// Start from the recommended allocation, ignoring any saved state.
    #[arg(long = ARG_RECOMMENDED)]
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub(crate) recommended: bool,
}

impl AllocateArgs {
    fn into_config(self) -> Result<AllocateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AllocateConfig::try_from(merged)
    }
}

/// Resolved `allocate` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AllocateConfig {
    pub(crate) roster: Utf8PathBuf,
    pub(crate) driver: u64,
    pub(crate) state: Option<Utf8PathBuf>,
    pub(crate) operations: Vec<Operation>,
    pub(crate) recommended: bool,
}

impl TryFrom<AllocateArgs> for AllocateConfig {
    type Error = CliError;

    fn try_from(args: AllocateArgs) -> Result<Self, Self::Error> {
        let roster = args.roster.ok_or(CliError::MissingArgument {
            field: ARG_ROSTER,
            env: ENV_ALLOCATE_ROSTER,
        })?;
        let driver = args.driver.ok_or(CliError::MissingArgument {
            field: ARG_DRIVER,
            env: ENV_ALLOCATE_DRIVER,
        })?;
        let operations = args
            .ops
            .as_deref()
            .map(parse_operations)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            roster,
            driver,
            state: args.state,
            operations,
            recommended: args.recommended,
        })
    }
}

/// One allocator operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Increment(Factor),
    Decrement(Factor),
    Set { factor: Factor, level: u8 },
    Reset,
}

impl FromStr for Operation {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| CliError::InvalidOperation {
            operation: s.to_owned(),
            reason,
        };
        if s.eq_ignore_ascii_case("reset") {
            return Ok(Self::Reset);
        }
        let (verb, operand) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected inc:, dec:, set: or reset"))?;
        match verb.trim().to_ascii_lowercase().as_str() {
            "inc" | "increment" => parse_factor(operand).map(Self::Increment),
            "dec" | "decrement" => parse_factor(operand).map(Self::Decrement),
            "set" => {
                let (factor, level) = operand
                    .split_once('=')
                    .ok_or_else(|| invalid("expected set:<factor>=<level>"))?;
                let level = level
                    .trim()
                    .parse::<u32>()
                    .map_err(|_| invalid("level must be a non-negative whole number"))?;
                Ok(Self::Set {
                    factor: parse_factor(factor)?,
                    level: u8::try_from(level).unwrap_or(u8::MAX),
                })
            }
            _ => Err(invalid("expected inc:, dec:, set: or reset")),
        }
    }
}

fn parse_factor(raw: &str) -> Result<Factor, CliError> {
    raw.parse().map_err(|source| CliError::InvalidIdentifier {
        field: ARG_OPS,
        source,
    })
}

/// Parse a comma-separated operation list, skipping empty entries.
pub(crate) fn parse_operations(list: &str) -> Result<Vec<Operation>, CliError> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::parse)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
enum Outcome {
    Committed { value: u8 },
    Clamped { requested: u8, value: u8 },
    Unchanged,
    Reset,
}

impl From<TargetChange> for Outcome {
    fn from(change: TargetChange) -> Self {
        match change {
            TargetChange::Committed { value } => Self::Committed { value },
            TargetChange::Clamped { requested, value } => Self::Clamped { requested, value },
            TargetChange::Unchanged => Self::Unchanged,
        }
    }
}

#[derive(Debug, Serialize)]
struct AppliedOperation {
    operation: String,
    #[serde(flatten)]
    outcome: Outcome,
}

impl Operation {
    fn apply(self, budget: &mut SkillBudget, record: &PerformanceRecord) -> AppliedOperation {
        let (operation, outcome) = match self {
            Self::Increment(factor) => (
                format!("inc:{factor}"),
                Outcome::from(budget.increment(factor)),
            ),
            Self::Decrement(factor) => (
                format!("dec:{factor}"),
                Outcome::from(budget.decrement(factor)),
            ),
            Self::Set { factor, level } => (
                format!("set:{factor}={level}"),
                Outcome::from(budget.set_target(factor, level)),
            ),
            Self::Reset => {
                budget.reset(record);
                ("reset".to_owned(), Outcome::Reset)
            }
        };
        AppliedOperation { operation, outcome }
    }
}

#[derive(Debug, Serialize)]
struct AllocateOutput<'a> {
    driver_id: u64,
    name: &'a str,
    applied: Vec<AppliedOperation>,
    snapshot: BudgetSnapshot,
    projection: ProjectionRequest,
}

pub(crate) fn run_allocate(args: AllocateArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    with_stdout(|writer| run_allocate_with(&config, writer))
}

pub(crate) fn run_allocate_with(
    config: &AllocateConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let roster = Roster::load(&config.roster)?;
    let record = roster.driver(config.driver)?;
    let mut budget = initial_budget(config, record)?;
    let applied = config
        .operations
        .iter()
        .map(|operation| operation.apply(&mut budget, record))
        .collect();
    if let Some(path) = &config.state {
        save_state(path, &budget)?;
    }
    let output = AllocateOutput {
        driver_id: record.id,
        name: &record.name,
        applied,
        snapshot: budget.snapshot(),
        projection: budget.projection_request(),
    };
    write_json(writer, &output)
}

fn initial_budget(
    config: &AllocateConfig,
    record: &PerformanceRecord,
) -> Result<SkillBudget, CliError> {
    if config.recommended {
        return Ok(SkillBudget::recommended(record).0);
    }
    let Some(path) = &config.state else {
        return Ok(SkillBudget::from_record(record));
    };
    match load_state(path)? {
        Some(mut budget) if budget.driver_id() == record.id => {
            if budget.sync_with(record) {
                log::debug!("percentiles for driver {} changed; allocation reset", record.id);
            }
            Ok(budget)
        }
        Some(budget) => {
            log::warn!(
                "discarding allocation in {path} for driver {}; driver {} was requested",
                budget.driver_id(),
                record.id
            );
            Ok(SkillBudget::from_record(record))
        }
        None => Ok(SkillBudget::from_record(record)),
    }
}

fn load_state(path: &Utf8Path) -> Result<Option<SkillBudget>, CliError> {
    match gridscout_fs::path_kind(path) {
        Ok(PathKind::Missing) => Ok(None),
        Ok(PathKind::File) => load_json(path).map(Some),
        Ok(PathKind::Other) => Err(CliError::SourcePathNotFile {
            field: ARG_STATE,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field: ARG_STATE,
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn save_state(path: &Utf8Path, budget: &SkillBudget) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(budget).map_err(CliError::SerialiseOutput)?;
    gridscout_fs::write_string(path, &payload).map_err(|source| CliError::WriteState {
        path: path.to_path_buf(),
        source,
    })
}
