//! # notifeed-service
//!
//! Business logic layer for Notifeed. Each service owns one concern of the
//! notification engine (retention, preferences, aggregation, delivery,
//! grouping, export) and receives its collaborators at construction time
//! via `Arc` references.
//!
//! Platform side effects go through the capability traits in
//! `notifeed_core::traits`; [`platform`] provides the concrete backends and
//! recording mocks.

pub mod aggregator;
pub mod context;
pub mod delivery;
pub mod export;
pub mod feed;
pub mod grouping;
pub mod platform;
pub mod preferences;
pub mod retention;

pub use aggregator::{Aggregator, NotificationSource};
pub use context::ServiceContext;
pub use delivery::{DeliveryEngine, DeliveryOutcome};
pub use export::ExportFormat;
pub use feed::FeedReconciler;
pub use grouping::{ExpansionState, NotificationGroup};
pub use platform::Platform;
pub use preferences::{DesktopService, DndService, SoundService, ViewPreferences};
pub use retention::{CleanupReport, RetentionManager};
