//! Storage Engine Module
//!
//! This module provides the core storage functionality for LineKV:
//! a thread-safe, sharded key-value map.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     StorageEngine                           │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │...64    │           │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ shards  │           │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - **Sharded Storage**: 64 independent shards by default
//! - **RwLock**: Multiple concurrent readers, exclusive writers
//! - **Per-key ordering**: All operations on one key are serialized by its shard
//!
//! ## Example
//!
//! ```
//! use linekv::storage::StorageEngine;
//! use bytes::Bytes;
//! use std::sync::Arc;
//!
//! let engine = Arc::new(StorageEngine::new());
//!
//! engine.set(Bytes::from("name"), Bytes::from("Ariz"));
//! assert!(engine.exists(&Bytes::from("name")));
//! ```

pub mod engine;

pub use engine::{StorageEngine, StorageStats, DEFAULT_SHARDS};
