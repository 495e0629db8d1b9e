//! JSON-file store provider.

pub mod store;

pub use store::FileStore;
