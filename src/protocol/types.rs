//! Command and Response Types
//!
//! This module defines the values exchanged between the parser, the
//! dispatcher and the session driver.
//!
//! ## Line Format
//!
//! A request is a single line of whitespace-separated tokens:
//!
//! ```text
//! COMMAND key [value]
//! ```
//!
//! A response is rendered as a single line:
//!
//! - a stored value, verbatim
//! - `(nil)` when a key does not exist
//! - `true` / `false` for boolean results
//! - `Error: <message>` for any failure
//!
//! ## Examples
//!
//! ```text
//! SET mykey myvalue   ->  myvalue
//! GET mykey           ->  myvalue
//! EXISTS mykey        ->  true
//! GET nothing         ->  (nil)
//! FOO mykey           ->  Error: unknown command 'FOO'; valid commands: SET, GET, DELETE, EXISTS
//! ```

use crate::error::{CommandError, Result};
use bytes::Bytes;
use std::fmt;

/// Rendered form of a missing key
pub const NIL: &[u8] = b"(nil)";

/// Prefix placed before every rendered error
pub const ERROR_PREFIX: &[u8] = b"Error: ";

/// The fixed vocabulary of commands.
///
/// Adding a kind here forces the dispatcher's `match` to handle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Set,
    Get,
    Delete,
    Exists,
}

impl CommandKind {
    /// All command kinds, in the order they are listed to users.
    pub const ALL: [CommandKind; 4] = [
        CommandKind::Set,
        CommandKind::Get,
        CommandKind::Delete,
        CommandKind::Exists,
    ];

    /// The wire name of this command.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Set => "SET",
            CommandKind::Get => "GET",
            CommandKind::Delete => "DELETE",
            CommandKind::Exists => "EXISTS",
        }
    }

    /// Names of all commands, for error messages and help text.
    pub fn names() -> [&'static str; 4] {
        Self::ALL.map(CommandKind::name)
    }

    /// Looks up a command by its exact (case-sensitive) name.
    pub fn from_name(name: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().as_bytes() == name)
    }

    /// Whether this command carries a value.
    #[inline]
    pub fn takes_value(self) -> bool {
        matches!(self, CommandKind::Set)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A validated, parsed command.
///
/// Fields are private so every instance has passed through [`Command::new`]:
/// the key is non-empty and a value is present exactly when the kind is `SET`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    kind: CommandKind,
    key: Bytes,
    value: Option<Bytes>,
}

impl Command {
    /// Builds a command, checking the key and value rules for `kind`.
    ///
    /// A value given to a command that does not take one is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use linekv::protocol::{Command, CommandKind};
    /// use bytes::Bytes;
    ///
    /// let cmd = Command::new(CommandKind::Get, Bytes::from("name"), None).unwrap();
    /// assert_eq!(cmd.key(), &Bytes::from("name"));
    /// ```
    pub fn new(kind: CommandKind, key: Bytes, value: Option<Bytes>) -> Result<Self> {
        if key.is_empty() {
            return Err(CommandError::MissingKey);
        }

        let value = if kind.takes_value() {
            match value {
                Some(v) => Some(v),
                None => return Err(CommandError::MissingValue(kind)),
            }
        } else {
            None
        };

        Ok(Self { kind, key, value })
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn key(&self) -> &Bytes {
        &self.key
    }

    /// The value to write. Always `Some` for `SET`, `None` otherwise.
    pub fn value(&self) -> Option<&Bytes> {
        self.value.as_ref()
    }
}

/// The outcome of dispatching one command.
///
/// Every command, successful or not, produces exactly one `Response`.
/// `Nil` is distinct from `Value` holding an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A stored value (the value read, or the value just written)
    Value(Bytes),

    /// The key does not exist
    Nil,

    /// Result of DELETE or EXISTS
    Boolean(bool),

    /// The command failed
    Error(CommandError),
}

impl Response {
    pub fn value(data: impl Into<Bytes>) -> Self {
        Response::Value(data.into())
    }

    pub fn boolean(b: bool) -> Self {
        Response::Boolean(b)
    }

    /// Converts an optional lookup result, mapping `None` to `Nil`.
    pub fn from_lookup(found: Option<Bytes>) -> Self {
        match found {
            Some(v) => Response::Value(v),
            None => Response::Nil,
        }
    }

    /// True if this response carries an error instead of a payload.
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }

    /// Returns the error, if any.
    pub fn as_error(&self) -> Option<&CommandError> {
        match self {
            Response::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Renders the response as one line, without the trailing newline.
    pub fn render(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.render_into(&mut buf);
        buf
    }

    /// Renders the response into an existing buffer.
    pub fn render_into(&self, buf: &mut Vec<u8>) {
        match self {
            Response::Value(data) => buf.extend_from_slice(data),
            Response::Nil => buf.extend_from_slice(NIL),
            Response::Boolean(true) => buf.extend_from_slice(b"true"),
            Response::Boolean(false) => buf.extend_from_slice(b"false"),
            Response::Error(e) => {
                buf.extend_from_slice(ERROR_PREFIX);
                buf.extend_from_slice(e.to_string().as_bytes());
            }
        }
    }
}

impl From<CommandError> for Response {
    fn from(err: CommandError) -> Self {
        Response::Error(err)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Value(data) => write!(f, "{}", String::from_utf8_lossy(data)),
            Response::Nil => f.write_str("(nil)"),
            Response::Boolean(b) => write!(f, "{}", b),
            Response::Error(e) => write!(f, "Error: {}", e),
        }
    }
}
