//! Error types for LineKV
//!
//! Every way a command can fail is a variant of [`CommandError`]. Failures
//! are returned as values and travel to the caller inside a
//! [`Response`](crate::protocol::Response); nothing here panics.

use crate::protocol::CommandKind;
use thiserror::Error;

/// Result type alias using CommandError
pub type Result<T> = std::result::Result<T, CommandError>;

/// Errors produced while parsing, validating or dispatching a command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    // -------------------------------------------------------------------------
    // Parse Errors
    // -------------------------------------------------------------------------
    /// The raw line contained no tokens
    #[error("empty command")]
    EmptyCommand,

    /// Fewer than two tokens (command and key)
    #[error("at least command and key required")]
    MalformedCommand,

    /// The first token is not a known command name
    #[error(
        "unknown command '{name}'; valid commands: {valid}",
        valid = CommandKind::names().join(", ")
    )]
    UnknownCommand { name: String },

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    /// The key token is empty
    #[error("missing key")]
    MissingKey,

    /// The command needs a value and none was given
    #[error("{0} requires a value")]
    MissingValue(CommandKind),

    // -------------------------------------------------------------------------
    // Internal Errors
    // -------------------------------------------------------------------------
    /// A validated command reached the dispatcher with no handler for its shape.
    /// Seeing this is a bug, not a user error.
    #[error("unsupported command: {0} has no dispatch entry")]
    UnsupportedCommand(CommandKind),
}

impl CommandError {
    /// Returns the name of the error kind, e.g. `"UnknownCommand"`.
    pub fn kind(&self) -> &'static str {
        match self {
            CommandError::EmptyCommand => "EmptyCommand",
            CommandError::MalformedCommand => "MalformedCommand",
            CommandError::UnknownCommand { .. } => "UnknownCommand",
            CommandError::MissingKey => "MissingKey",
            CommandError::MissingValue(_) => "MissingValue",
            CommandError::UnsupportedCommand(_) => "UnsupportedCommand",
        }
    }

    /// True for errors that indicate a defect rather than bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, CommandError::UnsupportedCommand(_))
    }
}
