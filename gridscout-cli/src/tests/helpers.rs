//! Temporary workspaces holding roster and state files.

use std::io::Write;

use camino::Utf8PathBuf;
use gridscout_core::test_support::sample_roster;
use tempfile::TempDir;

use crate::CliError;

pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    /// A workspace whose `roster.json` holds the sample roster.
    pub(super) fn with_sample_roster() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let workspace = Self { _dir: dir, root };
        let roster = serde_json::to_string(&sample_roster()).expect("serialise roster");
        workspace.write("roster.json", &roster);
        workspace
    }

    pub(super) fn roster(&self) -> Utf8PathBuf {
        self.path("roster.json")
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn write(&self, name: &str, contents: &str) {
        gridscout_fs::write_string(&self.path(name), contents).expect("write workspace file");
    }

    pub(super) fn read_json(&self, name: &str) -> serde_json::Value {
        let contents = gridscout_fs::read_to_string(&self.path(name)).expect("read workspace file");
        serde_json::from_str(&contents).expect("decode workspace file")
    }
}

/// Capture what a command writes and decode it as JSON.
pub(super) fn capture(
    run: impl FnOnce(&mut dyn Write) -> Result<(), CliError>,
) -> serde_json::Value {
    let mut buffer = Vec::new();
    run(&mut buffer).expect("command should succeed");
    serde_json::from_slice(&buffer).expect("command output should be JSON")
}

/// Select `pointer` from `value`, failing loudly when absent.
pub(super) fn at<'a>(value: &'a serde_json::Value, pointer: &str) -> &'a serde_json::Value {
    value
        .pointer(pointer)
        .unwrap_or_else(|| panic!("missing {pointer} in {value}"))
}

/// Identifiers under `pointer`, which must be an array of objects with `id`.
pub(super) fn ids(value: &serde_json::Value, pointer: &str) -> Vec<u64> {
    at(value, pointer)
        .as_array()
        .unwrap_or_else(|| panic!("{pointer} should be an array"))
        .iter()
        .map(|entry| at(entry, "/id").as_u64().expect("numeric id"))
        .collect()
}
