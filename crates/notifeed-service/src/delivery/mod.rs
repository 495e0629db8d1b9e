//! Sound/desktop delivery decisions.

pub mod engine;

pub use engine::{ClickHandler, DeliveryEngine, DeliveryOutcome};
