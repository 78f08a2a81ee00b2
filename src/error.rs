//! Error types for the enigma library.

use thiserror::Error;

/// Errors produced by the enigma library.
///
/// Every kind is fatal for the current run: the core never retries, and the
/// command-line driver reports the message and exits with status 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// Malformed cycle notation, rotor descriptor or configuration text.
    #[error("format error: {0}")]
    Format(String),
    /// Alphabet index outside `[0, size)`.
    #[error("range error: {0}")]
    Range(String),
    /// Symbol or rotor name not found.
    #[error("lookup error: {0}")]
    Lookup(String),
    /// Rotor name repeated where names must be unique.
    #[error("duplicate error: {0}")]
    Duplicate(String),
    /// Structural invariant of the machine violated.
    #[error("configuration error: {0}")]
    Config(String),
    /// Conversion attempted before the machine was set up.
    #[error("state error: {0}")]
    State(String),
}

impl EnigmaError {
    pub(crate) fn format(msg: impl Into<String>) -> Self {
        EnigmaError::Format(msg.into())
    }

    pub(crate) fn range(msg: impl Into<String>) -> Self {
        EnigmaError::Range(msg.into())
    }

    pub(crate) fn lookup(msg: impl Into<String>) -> Self {
        EnigmaError::Lookup(msg.into())
    }

    pub(crate) fn duplicate(msg: impl Into<String>) -> Self {
        EnigmaError::Duplicate(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        EnigmaError::Config(msg.into())
    }

    pub(crate) fn state(msg: impl Into<String>) -> Self {
        EnigmaError::State(msg.into())
    }
}
