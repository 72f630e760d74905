//! Loading rosters and persisted state from disk.

use camino::{Utf8Path, Utf8PathBuf};
use gridscout_core::{PerformanceRecord, duplicate_ids};
use gridscout_fs::PathKind;
use serde::de::DeserializeOwned;

use crate::{ARG_ROSTER, CliError};

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match gridscout_fs::path_kind(path) {
        Ok(PathKind::File) => Ok(()),
        Ok(PathKind::Other) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Ok(PathKind::Missing) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Decode a JSON document from `path`.
pub(crate) fn load_json<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, CliError> {
    let contents = gridscout_fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

/// A roster file and the records it holds.
#[derive(Debug, Clone)]
pub(crate) struct Roster {
    pub(crate) path: Utf8PathBuf,
    pub(crate) records: Vec<PerformanceRecord>,
}

impl Roster {
    /// Load a JSON array of records, warning about duplicate identifiers.
    pub(crate) fn load(path: &Utf8Path) -> Result<Self, CliError> {
        require_existing(path, ARG_ROSTER)?;
        let records: Vec<PerformanceRecord> = load_json(path)?;
        let duplicates = duplicate_ids(&records);
        if !duplicates.is_empty() {
            log::warn!(
                "roster {path} repeats driver ids {duplicates:?}; lookups use the first match"
            );
        }
        log::debug!("loaded {} records from {path}", records.len());
        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// The first record with identifier `id`.
    pub(crate) fn driver(&self, id: u64) -> Result<&PerformanceRecord, CliError> {
        self.records
            .iter()
            .find(|record| record.id == id)
            .ok_or_else(|| CliError::UnknownDriver {
                id,
                path: self.path.clone(),
            })
    }
}
