//! Error types emitted by the gridscout CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use gridscout_core::ParseIdentifierError;
use thiserror::Error;

/// Errors emitted by the gridscout CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name.
        field: &'static str,
        /// Environment variable name.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Reading an input file failed.
    #[error("failed to read {path:?}: {source}")]
    ReadInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// An input file held malformed or invalid JSON.
    #[error("failed to parse JSON in {path:?}: {source}")]
    ParseInput {
        /// Input path.
        path: Utf8PathBuf,
        /// Decoder error, including allocator state validation failures.
        #[source]
        source: serde_json::Error,
    },
    /// The roster has no record with the requested identifier.
    #[error("driver {id} is not in roster {path:?}")]
    UnknownDriver {
        /// Requested identifier.
        id: u64,
        /// Roster path.
        path: Utf8PathBuf,
    },
    /// An identifier option did not name a known value.
    #[error("invalid --{field}: {source}")]
    InvalidIdentifier {
        /// Flag carrying the identifier.
        field: &'static str,
        /// Parse failure.
        #[source]
        source: ParseIdentifierError,
    },
    /// An allocation operation was malformed.
    #[error("invalid operation '{operation}': {reason}")]
    InvalidOperation {
        /// The operation as written.
        operation: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// Persisting allocator state failed.
    #[error("failed to write allocation state to {path:?}: {source}")]
    WriteState {
        /// State path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Serialising a JSON document failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing to standard output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Installing the diagnostic log subscriber failed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[source] Box<dyn std::error::Error + Send + Sync>),
}
