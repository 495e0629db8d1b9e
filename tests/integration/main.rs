//! Cross-crate integration tests.

mod helpers;

mod feed_test;
mod interaction_test;
mod preferences_test;
mod retention_test;
mod worker_test;
