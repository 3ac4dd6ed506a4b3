//! # LineKV - An In-Memory Key-Value Engine
//!
//! LineKV is an in-memory key-value store driven by a line-oriented command
//! protocol. Any number of clients may use it at once; every command,
//! successful or not, yields exactly one response.
//!
//! ## Features
//!
//! - **Line Protocol**: `COMMAND key [value]`, one command per line
//! - **Concurrent Access**: Sharded storage with one RwLock per shard
//! - **Uniform Responses**: Errors are values, never panics or disconnects
//! - **Two Front-Ends**: An interactive terminal session and a TCP server
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              LineKV                                     │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐                  │
//! │  │ TCP / stdin │───>│  Session    │───>│  Command    │                  │
//! │  │             │    │  Driver     │    │  Handler    │                  │
//! │  └─────────────┘    └─────────────┘    └──────┬──────┘                  │
//! │                                               │                         │
//! │                                               ▼                         │
//! │  ┌─────────────┐    ┌──────────────────────────────────────────────┐   │
//! │  │   Line      │    │              StorageEngine                   │   │
//! │  │   Parser    │    │  ┌────────┐ ┌────────┐ ┌────────┐ ┌────────┐ │   │
//! │  │             │    │  │Shard 0 │ │Shard 1 │ │Shard 2 │ │...N    │ │   │
//! │  └─────────────┘    │  │RwLock  │ │RwLock  │ │RwLock  │ │shards  │ │   │
//! │                     │  └────────┘ └────────┘ └────────┘ └────────┘ │   │
//! │                     └──────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use linekv::commands::CommandHandler;
//! use linekv::protocol::Response;
//! use linekv::storage::StorageEngine;
//! use std::sync::Arc;
//!
//! let handler = CommandHandler::new(Arc::new(StorageEngine::new()));
//!
//! assert_eq!(handler.process(b"SET mykey myvalue"), Response::value("myvalue"));
//! assert_eq!(handler.process(b"EXISTS mykey"), Response::boolean(true));
//! assert_eq!(handler.process(b"DELETE mykey").render(), b"true");
//! assert_eq!(handler.process(b"GET mykey").render(), b"(nil)");
//! ```
//!
//! ## Supported Commands
//!
//! - `SET key value`
//! - `GET key`
//! - `DELETE key`
//! - `EXISTS key`
//!
//! Command names are case-sensitive. Values cannot contain whitespace;
//! tokens after the value are ignored.
//!
//! ## Module Overview
//!
//! - [`protocol`]: Command model, response envelope and line parser
//! - [`storage`]: Thread-safe sharded storage engine
//! - [`commands`]: Dispatch from commands to storage operations
//! - [`connection`]: Session driver for TCP clients and the terminal
//! - [`config`]: Command-line configuration
//! - [`error`]: Command error taxonomy

pub mod commands;
pub mod config;
pub mod connection;
pub mod error;
pub mod protocol;
pub mod storage;

// Re-export commonly used types for convenience
pub use commands::CommandHandler;
pub use connection::{handle_connection, run_interactive, Session, SessionStats};
pub use error::CommandError;
pub use protocol::{parse_line, parse_tokens, Command, CommandKind, Response};
pub use storage::StorageEngine;

/// The default port LineKV listens on
pub const DEFAULT_PORT: u16 = 7379;

/// The default host LineKV binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of LineKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
