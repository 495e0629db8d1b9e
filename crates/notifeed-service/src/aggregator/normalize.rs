//! Mapping from raw source records to [`Notification`].
//!
//! Records whose timestamp cannot be parsed are dropped.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::json;
use tracing::warn;

use notifeed_entity::source::{ActivityRecord, AgentRecord, AlertRecord, EventRecord};
use notifeed_entity::{
    ActionStyle, Notification, NotificationAction, NotificationPriority, NotificationType,
};

/// Source name for health alerts.
pub const ALERTS: &str = "alerts";
/// Source name for scheduled events.
pub const EVENTS: &str = "events";
/// Source name for agent runs.
pub const AGENTS: &str = "agents";
/// Source name for the activity log.
pub const ACTIVITY: &str = "activity";

/// Every source name, in tie-break order.
pub const SOURCE_ORDER: [&str; 4] = [ALERTS, EVENTS, AGENTS, ACTIVITY];

/// Parses RFC 3339 timestamps, and naive `YYYY-MM-DD HH:MM:SS` /
/// `YYYY-MM-DDTHH:MM:SS` forms as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn timestamp_or_warn(source: &str, id: &str, raw: &str) -> Option<DateTime<Utc>> {
    let parsed = parse_timestamp(raw);
    if parsed.is_none() {
        warn!(source, id, timestamp = raw, "Skipping record with unparseable timestamp");
    }
    parsed
}

/// Maps a health alert.
pub fn normalize_alert(record: &AlertRecord) -> Option<Notification> {
    let id = format!("alert-{}", record.id);
    let timestamp = timestamp_or_warn(ALERTS, &id, &record.timestamp)?;
    let status = record.status.to_lowercase();

    let (kind, priority, title) = match status.as_str() {
        "critical" => (NotificationType::Alert, NotificationPriority::Urgent, "Critical alert"),
        "error" => (NotificationType::Alert, NotificationPriority::Normal, "Error alert"),
        "warning" => (NotificationType::Warning, NotificationPriority::High, "Warning"),
        _ => (NotificationType::Info, NotificationPriority::Normal, "Health notice"),
    };
    let resolved = record.resolved_at.is_some();
    let title = if resolved {
        format!("Resolved: {title}")
    } else {
        title.to_string()
    };

    let mut notification =
        Notification::new(id, kind, title, record.message.clone(), timestamp, ALERTS);
    notification.read = resolved;
    notification.priority = Some(priority);
    notification.actions = vec![NotificationAction::link(
        "View health",
        "/health",
        ActionStyle::Primary,
    )];
    notification
        .metadata
        .insert("status".into(), json!(record.status));
    if let Some(services) = &record.affected_services {
        notification
            .metadata
            .insert("affectedServices".into(), json!(services));
    }
    if let Some(resolved_at) = &record.resolved_at {
        notification
            .metadata
            .insert("resolvedAt".into(), json!(resolved_at));
    }
    Some(notification)
}

/// Maps a scheduled event.
pub fn normalize_event(record: &EventRecord) -> Option<Notification> {
    let id = format!("event-{}", record.id);
    let timestamp = timestamp_or_warn(EVENTS, &id, &record.timestamp)?;

    let kind = match record.event_type.to_lowercase().as_str() {
        "error" | "alert" => NotificationType::Alert,
        "warning" => NotificationType::Warning,
        "success" => NotificationType::Success,
        "info" => NotificationType::Info,
        _ => NotificationType::Event,
    };

    let mut notification = Notification::new(
        id,
        kind,
        record.title.clone(),
        record.description.clone().unwrap_or_default(),
        timestamp,
        EVENTS,
    );
    notification.priority = Some(NotificationPriority::Normal);
    notification
        .metadata
        .insert("eventType".into(), json!(record.event_type));
    Some(notification)
}

/// Maps an agent run. The id embeds the status so each transition is a
/// new notification.
pub fn normalize_agent(record: &AgentRecord) -> Option<Notification> {
    let status = record.status.to_lowercase();
    let id = format!("agent-{}-{}", record.id, status);
    let raw_time = record
        .last_activity
        .as_deref()
        .or(record.start_time.as_deref())
        .unwrap_or_default();
    let timestamp = timestamp_or_warn(AGENTS, &id, raw_time)?;

    let (kind, priority, title) = match status.as_str() {
        "running" => (
            NotificationType::Agent,
            NotificationPriority::Normal,
            "Agent running".to_string(),
        ),
        "completed" => (
            NotificationType::Success,
            NotificationPriority::Normal,
            "Agent completed".to_string(),
        ),
        "failed" | "error" => (
            NotificationType::Alert,
            NotificationPriority::High,
            "Agent failed".to_string(),
        ),
        other => (
            NotificationType::Agent,
            NotificationPriority::Normal,
            format!("Agent {other}"),
        ),
    };
    let read = !matches!(status.as_str(), "running" | "completed" | "failed" | "error");

    let mut notification = Notification::new(
        id,
        kind,
        title,
        record.description.clone(),
        timestamp,
        AGENTS,
    );
    notification.read = read;
    notification.priority = Some(priority);
    notification.actions = vec![NotificationAction::link(
        "View agents",
        "/agents",
        ActionStyle::Secondary,
    )];
    notification
        .metadata
        .insert("status".into(), json!(record.status));
    if let Some(tokens) = record.tokens_used {
        notification.metadata.insert("tokensUsed".into(), json!(tokens));
    }
    if let Some(tools) = &record.tools_used {
        notification.metadata.insert("toolsUsed".into(), tools.clone());
    }
    if let Some(start) = &record.start_time {
        notification.metadata.insert("startTime".into(), json!(start));
    }
    Some(notification)
}

/// Maps an activity log entry.
pub fn normalize_activity(record: &ActivityRecord) -> Option<Notification> {
    let id = format!("activity-{}", record.id);
    let timestamp = timestamp_or_warn(ACTIVITY, &id, &record.created_at)?;

    let mut notification = Notification::new(
        id,
        NotificationType::Activity,
        record.title.clone(),
        record.description.clone().unwrap_or_default(),
        timestamp,
        ACTIVITY,
    );
    notification.priority = Some(NotificationPriority::Low);
    notification
        .metadata
        .insert("activityType".into(), json!(record.activity_type));
    if let Some(actor) = &record.actor {
        notification.metadata.insert("actor".into(), json!(actor));
    }
    Some(notification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use notifeed_entity::source::{
        ActivityResponse, AgentsResponse, AlertsResponse, EventsResponse,
    };

    #[test]
    fn test_parse_timestamp_forms() {
        let expected = Utc.with_ymd_and_hms(2026, 3, 2, 10, 15, 0).unwrap();
        assert_eq!(parse_timestamp("2026-03-02T10:15:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-02T12:15:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-02 10:15:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-02T10:15:00.000"), Some(expected));
        assert_eq!(parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_resolved_alert_is_read() {
        let body: AlertsResponse = serde_json::from_str(
            r#"{"alerts":[
                {"id":1,"timestamp":"2026-03-02T10:00:00Z","status":"critical","message":"db down","affectedServices":["db"]},
                {"id":2,"timestamp":"2026-03-02T09:00:00Z","status":"warning","message":"slow","resolvedAt":"2026-03-02T09:30:00Z"}
            ]}"#,
        )
        .unwrap();

        let critical = normalize_alert(&body.alerts[0]).unwrap();
        assert_eq!(critical.id, "alert-1");
        assert_eq!(critical.kind, NotificationType::Alert);
        assert_eq!(critical.priority, Some(NotificationPriority::Urgent));
        assert!(!critical.read);
        assert_eq!(critical.metadata["affectedServices"], json!(["db"]));

        let resolved = normalize_alert(&body.alerts[1]).unwrap();
        assert!(resolved.read);
        assert_eq!(resolved.kind, NotificationType::Warning);
        assert!(resolved.title.starts_with("Resolved: "));
        assert_eq!(resolved.metadata["resolvedAt"], json!("2026-03-02T09:30:00Z"));
    }

    #[test]
    fn test_event_type_mapping() {
        let body: EventsResponse = serde_json::from_str(
            r#"{"events":[
                {"id":"e1","timestamp":"2026-03-02T10:00:00Z","type":"error","title":"Backup failed"},
                {"id":"e2","timestamp":"2026-03-02T10:00:00Z","type":"deploy","title":"Deploy","description":"v2"}
            ]}"#,
        )
        .unwrap();
        let failed = normalize_event(&body.events[0]).unwrap();
        assert_eq!(failed.kind, NotificationType::Alert);
        assert_eq!(failed.message, "");
        let deploy = normalize_event(&body.events[1]).unwrap();
        assert_eq!(deploy.kind, NotificationType::Event);
        assert_eq!(deploy.message, "v2");
        assert_eq!(deploy.metadata["eventType"], json!("deploy"));
    }

    #[test]
    fn test_agent_status_mapping() {
        let body: AgentsResponse = serde_json::from_str(
            r#"{"agents":[
                {"id":7,"status":"running","description":"indexing","startTime":"2026-03-02T09:00:00Z","lastActivity":"2026-03-02T09:05:00Z","tokensUsed":1200,"toolsUsed":["grep"]},
                {"id":8,"status":"failed","description":"deploy","startTime":"2026-03-02T08:00:00Z"},
                {"id":9,"status":"idle","description":"standby","startTime":"2026-03-02T07:00:00Z"}
            ]}"#,
        )
        .unwrap();

        let running = normalize_agent(&body.agents[0]).unwrap();
        assert_eq!(running.id, "agent-7-running");
        assert_eq!(running.kind, NotificationType::Agent);
        assert!(!running.read);
        assert_eq!(
            running.timestamp,
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 5, 0).unwrap()
        );
        assert_eq!(running.metadata["tokensUsed"], json!(1200));
        assert_eq!(running.metadata["toolsUsed"], json!(["grep"]));

        let failed = normalize_agent(&body.agents[1]).unwrap();
        assert_eq!(failed.kind, NotificationType::Alert);
        assert_eq!(failed.priority, Some(NotificationPriority::High));
        assert_eq!(
            failed.timestamp,
            Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
        );

        assert!(normalize_agent(&body.agents[2]).unwrap().read);
    }

    #[test]
    fn test_activity_and_bad_timestamp() {
        let body: ActivityResponse = serde_json::from_str(
            r#"{"activities":[
                {"id":3,"type":"login","title":"Signed in","actor":"sam","created_at":"2026-03-02 10:00:00"},
                {"id":4,"type":"login","title":"Broken","created_at":"not a time"}
            ]}"#,
        )
        .unwrap();
        let entry = normalize_activity(&body.activities[0]).unwrap();
        assert_eq!(entry.id, "activity-3");
        assert_eq!(entry.priority, Some(NotificationPriority::Low));
        assert_eq!(entry.metadata["actor"], json!("sam"));
        assert!(normalize_activity(&body.activities[1]).is_none());
    }
}
