//! Line Command Parser
//!
//! This module turns raw request lines into validated [`Command`]s.
//!
//! ## How the Parser Works
//!
//! 1. The line is split on runs of ASCII whitespace. There is no quoting or
//!    escaping, so a value can never contain a space.
//! 2. The first token is matched byte-for-byte against the command names.
//! 3. The second token is the key, the third (if any) the value. Anything
//!    after the third token is ignored.
//! 4. [`Command::new`] applies the per-command key/value rules.
//!
//! Parsing is pure: no storage access and no shared state, so the functions
//! here can be called from any number of tasks at once.

use crate::error::{CommandError, Result};
use crate::protocol::types::{Command, CommandKind};
use bytes::Bytes;

/// Parses a single raw line into a command.
///
/// # Example
///
/// ```
/// use linekv::protocol::{parse_line, CommandKind};
///
/// let cmd = parse_line(b"SET mykey myvalue").unwrap();
/// assert_eq!(cmd.kind(), CommandKind::Set);
/// ```
pub fn parse_line(line: &[u8]) -> Result<Command> {
    let tokens: Vec<&[u8]> = split_tokens(line).collect();
    if tokens.is_empty() {
        return Err(CommandError::EmptyCommand);
    }

    parse_tokens(&tokens)
}

/// Parses an already tokenized command.
///
/// Tokens are taken verbatim; the key is not trimmed.
pub fn parse_tokens<T: AsRef<[u8]>>(tokens: &[T]) -> Result<Command> {
    if tokens.len() < 2 {
        return Err(CommandError::MalformedCommand);
    }

    let name = tokens[0].as_ref();
    let kind = CommandKind::from_name(name).ok_or_else(|| CommandError::UnknownCommand {
        name: String::from_utf8_lossy(name).into_owned(),
    })?;

    let key = Bytes::copy_from_slice(tokens[1].as_ref());
    let value = tokens.get(2).map(|t| Bytes::copy_from_slice(t.as_ref()));

    Command::new(kind, key, value)
}

/// Splits a line on runs of ASCII whitespace, skipping empty tokens.
fn split_tokens(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
}
