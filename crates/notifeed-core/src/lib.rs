//! # notifeed-core
//!
//! Core crate for Notifeed. Contains the capability traits the engine is
//! written against (key-value storage, clock, audio, desktop notifications,
//! haptics), configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Notifeed crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
