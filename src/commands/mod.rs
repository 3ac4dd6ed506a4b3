//! Command Handler Module
//!
//! This module implements the dispatch layer for LineKV.
//! It receives parsed commands, executes them against the storage engine,
//! and returns a [`Response`](crate::protocol::Response).
//!
//! ## Architecture
//!
//! ```text
//! Raw line
//!       │
//!       ▼
//! ┌─────────────────┐
//! │  Line Parser    │  (protocol module)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ CommandHandler  │  (this module)
//! │                 │
//! │  - Dispatch     │
//! │  - Execute      │
//! │  - Wrap result  │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ StorageEngine   │  (storage module)
//! └─────────────────┘
//! ```

pub mod handler;

// Re-export the main command handler
pub use handler::CommandHandler;
