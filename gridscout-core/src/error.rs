//! Errors raised when parsing engine identifiers from text.

use thiserror::Error;

/// A string did not name any known identifier of the requested kind.
///
/// # Examples
/// ```
/// use gridscout_core::Tier;
///
/// let err = "podium".parse::<Tier>().unwrap_err();
/// assert_eq!(err.to_string(), "unknown tier 'podium'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseIdentifierError {
    /// Human-readable name of the identifier family, e.g. `tier`.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseIdentifierError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Normalise user-supplied identifiers: trimmed, lowercase, `-` read as `_`.
pub(crate) fn normalise_identifier(raw: &str) -> String {
    raw.trim().to_lowercase().replace('-', "_")
}
