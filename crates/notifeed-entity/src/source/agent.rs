//! `GET /api/agents` records.

use serde::{Deserialize, Serialize};

use super::RawId;

/// Response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentsResponse {
    /// Agent runs.
    #[serde(default)]
    pub agents: Vec<AgentRecord>,
}

/// An agent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    /// Backend id.
    pub id: RawId,
    /// `running`, `completed`, `failed`, `idle`, ...
    pub status: String,
    /// What the agent is doing.
    #[serde(default)]
    pub description: String,
    /// Run start (ISO-8601).
    #[serde(default)]
    pub start_time: Option<String>,
    /// Last activity (ISO-8601).
    #[serde(default)]
    pub last_activity: Option<String>,
    /// Tokens consumed so far.
    #[serde(default)]
    pub tokens_used: Option<u64>,
    /// Tools invoked so far (a count or a list, depending on the backend).
    #[serde(default)]
    pub tools_used: Option<serde_json::Value>,
}
