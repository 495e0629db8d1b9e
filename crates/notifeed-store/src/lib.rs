//! # notifeed-store
//!
//! Persistent key-value store implementations for Notifeed. Supports two
//! modes:
//!
//! - **memory**: In-process map using [dashmap](https://crates.io/crates/dashmap),
//!   with an optional byte quota
//! - **file**: A single JSON document on disk, rewritten on every write
//!
//! The provider is selected at runtime based on configuration.

#[cfg(feature = "file")]
pub mod file;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::StoreManager;
