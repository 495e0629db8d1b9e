//! Raw records returned by the backend source endpoints.
//!
//! These mirror the JSON bodies exactly; normalization into
//! [`Notification`](crate::notification::Notification) happens in the
//! service layer.

pub mod activity;
pub mod agent;
pub mod alert;
pub mod event;

use serde::{Deserialize, Serialize};

pub use activity::{ActivityRecord, ActivityResponse};
pub use agent::{AgentRecord, AgentsResponse};
pub use alert::{AlertRecord, AlertsResponse};
pub use event::{EventRecord, EventsResponse};

/// A backend id, which some endpoints send as a number and others as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    /// Numeric id.
    Number(i64),
    /// String id.
    Text(String),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
