//! Multi-source notification aggregation.

pub mod http;
pub mod normalize;
pub mod service;
pub mod source;

pub use http::{ActivitySource, AgentsSource, AlertsSource, ApiClient, EventsSource};
pub use service::Aggregator;
pub use source::NotificationSource;
