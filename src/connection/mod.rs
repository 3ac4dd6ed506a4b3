//! Session Driver Module
//!
//! This module runs client sessions against LineKV. A session reads one
//! command per line, executes it, and writes one response line back. TCP
//! clients and the interactive terminal use the same loop.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────┐
//! │  TCP Listener        │      │  Terminal            │
//! │  (serve)             │      │  (repl)              │
//! └──────────┬───────────┘      └──────────┬───────────┘
//!            │ accept()                    │ stdin/stdout
//!            ▼                             ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Session                               │
//! │                                                             │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐     │
//! │  │ Read line   │───>│ Process cmd │───>│ Send resp   │     │
//! │  └─────────────┘    └─────────────┘    └─────────────┘     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use linekv::connection::{handle_connection, SessionStats};
//! use linekv::commands::CommandHandler;
//! use linekv::storage::StorageEngine;
//! use std::sync::Arc;
//!
//! let storage = Arc::new(StorageEngine::new());
//! let stats = Arc::new(SessionStats::new());
//! let handler = CommandHandler::new(storage);
//!
//! // For each accepted connection...
//! let (stream, addr) = listener.accept().await?;
//! tokio::spawn(handle_connection(stream, addr, handler, stats));
//! ```

pub mod handler;

// Re-export commonly used types
pub use handler::{
    handle_connection, run_interactive, Session, SessionEnd, SessionError, SessionStats,
    EXIT_SENTINEL, MAX_LINE_LENGTH,
};
