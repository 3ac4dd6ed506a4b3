//! Command Handler Module
//!
//! This module binds parsed commands to storage operations.
//!
//! ## Supported Commands
//!
//! - `SET key value` - Store a value; responds with the value written
//! - `GET key` - Read a value; responds with the value or `(nil)`
//! - `DELETE key` - Remove a key; responds with whether it existed
//! - `EXISTS key` - Check a key; responds with whether it exists
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │   parse()   │───>│  dispatch() │───>│  execute()  │     │
//! │  └─────────────┘    └─────────────┘    └─────────────┘     │
//! │                                               │             │
//! │                                               ▼             │
//! │                                      StorageEngine          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every path ends in a [`Response`]; parse and validation failures become
//! `Response::Error` and never reach the storage engine.

use crate::error::CommandError;
use crate::protocol::{parse_line, Command, CommandKind, Response};
use crate::storage::StorageEngine;
use std::sync::Arc;
use tracing::trace;

/// Dispatches commands to the storage engine.
///
/// The handler holds no state of its own besides a shared reference to the
/// engine, so clones can be handed to every session.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    /// The storage engine
    storage: Arc<StorageEngine>,
}

impl CommandHandler {
    /// Creates a new command handler with the given storage engine.
    pub fn new(storage: Arc<StorageEngine>) -> Self {
        Self { storage }
    }

    /// Returns the storage engine this handler dispatches to.
    pub fn storage(&self) -> &Arc<StorageEngine> {
        &self.storage
    }

    /// Parses a raw line and executes it.
    ///
    /// # Example
    ///
    /// ```
    /// use linekv::commands::CommandHandler;
    /// use linekv::protocol::Response;
    /// use linekv::storage::StorageEngine;
    /// use std::sync::Arc;
    ///
    /// let handler = CommandHandler::new(Arc::new(StorageEngine::new()));
    /// assert_eq!(handler.process(b"SET mykey myvalue"), Response::value("myvalue"));
    /// assert_eq!(handler.process(b"GET other"), Response::Nil);
    /// ```
    pub fn process(&self, line: &[u8]) -> Response {
        match parse_line(line) {
            Ok(command) => self.execute(&command),
            Err(e) => Response::Error(e),
        }
    }

    /// Executes a validated command and returns the response.
    pub fn execute(&self, command: &Command) -> Response {
        trace!(command = %command.kind(), key = ?command.key(), "Dispatching command");

        match command.kind() {
            CommandKind::Set => self.cmd_set(command),
            CommandKind::Get => self.cmd_get(command),
            CommandKind::Delete => self.cmd_delete(command),
            CommandKind::Exists => self.cmd_exists(command),
        }
    }

    /// SET key value
    fn cmd_set(&self, command: &Command) -> Response {
        // `Command::new` guarantees a value for SET.
        let Some(value) = command.value() else {
            return Response::Error(CommandError::UnsupportedCommand(command.kind()));
        };

        let stored = self.storage.set(command.key().clone(), value.clone());
        Response::Value(stored)
    }

    /// GET key
    fn cmd_get(&self, command: &Command) -> Response {
        Response::from_lookup(self.storage.get(command.key()))
    }

    /// DELETE key
    fn cmd_delete(&self, command: &Command) -> Response {
        Response::Boolean(self.storage.delete(command.key()))
    }

    /// EXISTS key
    fn cmd_exists(&self, command: &Command) -> Response {
        Response::Boolean(self.storage.exists(command.key()))
    }
}
