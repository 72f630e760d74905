//! `list` command: filter, sort and summarise a roster.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use gridscout_core::{
    FilterState, PerformanceRecord, SortKey, SortOrder, TierCount, apply_filters, sort_drivers,
    summarise_tiers,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::input::{Roster, load_json, require_existing};
use crate::output::{with_stdout, write_json};
use crate::{ARG_FILTERS, ARG_ORDER, ARG_ROSTER, ARG_SEARCH, ARG_SORT, CliError, ENV_LIST_ROSTER};

/// CLI arguments for the `list` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "list",
    about = "Filter and sort a roster",
    long_about = "Apply a saved filter state and an optional search, then \
                  stable-sort the survivors. Emits the selected records and \
                  a per-tier count of the selection."
)]
#[ortho_config(prefix = "GRIDSCOUT")]
pub(crate) struct ListArgs {
    /// Path to a JSON array of performance records.
    #[arg(long = ARG_ROSTER, value_name = "path")]
    #[serde(default)]
    pub(crate) roster: Option<Utf8PathBuf>,
    /// Path to a JSON-encoded filter state.
    #[arg(long = ARG_FILTERS, value_name = "path")]
    #[serde(default)]
    pub(crate) filters: Option<Utf8PathBuf>,
    /// Name or id substring; replaces any search in the filter state.
    #[arg(long = ARG_SEARCH, value_name = "text")]
    #[serde(default)]
    pub(crate) search: Option<String>,
    /// Sort key (overall_score, speed_percentile, consistency_percentile,
    /// avg_finish, races, id).
    #[arg(long = ARG_SORT, value_name = "key")]
    #[serde(default)]
    pub(crate) sort: Option<String>,
    /// Sort direction (asc or desc).
    #[arg(long = ARG_ORDER, value_name = "order")]
    #[serde(default)]
    pub(crate) order: Option<String>,
}

impl ListArgs {
    fn into_config(self) -> Result<ListConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ListConfig::try_from(merged)
    }
}

/// Resolved `list` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListConfig {
    pub(crate) roster: Utf8PathBuf,
    pub(crate) filters: Option<Utf8PathBuf>,
    pub(crate) search: Option<String>,
    pub(crate) sort: SortKey,
    pub(crate) order: SortOrder,
}

impl ListConfig {
    fn filter_state(&self) -> Result<FilterState, CliError> {
        let state = match &self.filters {
            Some(path) => {
                require_existing(path, ARG_FILTERS)?;
                load_json(path)?
            }
            None => FilterState::default(),
        };
        Ok(match &self.search {
            Some(search) => state.with_search(search.clone()),
            None => state,
        })
    }
}

impl TryFrom<ListArgs> for ListConfig {
    type Error = CliError;

    fn try_from(args: ListArgs) -> Result<Self, Self::Error> {
        let roster = args.roster.ok_or(CliError::MissingArgument {
            field: ARG_ROSTER,
            env: ENV_LIST_ROSTER,
        })?;
        let sort = args
            .sort
            .as_deref()
            .map(str::parse::<SortKey>)
            .transpose()
            .map_err(|source| CliError::InvalidIdentifier {
                field: ARG_SORT,
                source,
            })?
            .unwrap_or_default();
        let order = args
            .order
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()
            .map_err(|source| CliError::InvalidIdentifier {
                field: ARG_ORDER,
                source,
            })?
            .unwrap_or_default();
        Ok(Self {
            roster,
            filters: args.filters,
            search: args.search,
            sort,
            order,
        })
    }
}

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    total: usize,
    active_filters: usize,
    sort: SortKey,
    order: SortOrder,
    tiers: Vec<TierCount>,
    drivers: Vec<&'a PerformanceRecord>,
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    with_stdout(|writer| run_list_with(&config, writer))
}

pub(crate) fn run_list_with(config: &ListConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let roster = Roster::load(&config.roster)?;
    let filters = config.filter_state()?;
    let mut drivers = apply_filters(&roster.records, &filters);
    sort_drivers(&mut drivers, config.sort, config.order);
    log::debug!(
        "{} of {} drivers pass {} active filters",
        drivers.len(),
        roster.records.len(),
        filters.active_filter_count()
    );
    let output = ListOutput {
        total: roster.records.len(),
        active_filters: filters.active_filter_count(),
        sort: config.sort,
        order: config.order,
        tiers: summarise_tiers(drivers.iter().copied()),
        drivers,
    };
    write_json(writer, &output)
}
