//! JSON and CSV snapshots of the feed.

use chrono::NaiveDate;

use notifeed_core::result::AppResult;
use notifeed_entity::Notification;

/// CSV columns, in order.
pub const CSV_COLUMNS: [&str; 7] = ["id", "type", "title", "message", "timestamp", "read", "source"];

/// Snapshot format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Parses `json` or `csv`.
    pub fn from_str_value(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// File extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Pretty-printed JSON array of notifications.
pub fn export_json(feed: &[Notification]) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(feed)?)
}

/// CSV with a header row and RFC 4180 quoting.
pub fn export_csv(feed: &[Notification]) -> String {
    let mut out = CSV_COLUMNS.join(",");
    out.push_str("\r\n");
    for n in feed {
        let timestamp = n.timestamp.to_rfc3339();
        let read = n.read.to_string();
        let fields = [
            n.id.as_str(),
            n.kind.as_str(),
            n.title.as_str(),
            n.message.as_str(),
            timestamp.as_str(),
            read.as_str(),
            n.source.as_str(),
        ];
        let row: Vec<String> = fields.iter().map(|f| csv_field(f)).collect();
        out.push_str(&row.join(","));
        out.push_str("\r\n");
    }
    out
}

/// Renders `feed` in `format`.
pub fn export(feed: &[Notification], format: ExportFormat) -> AppResult<String> {
    match format {
        ExportFormat::Json => export_json(feed),
        ExportFormat::Csv => Ok(export_csv(feed)),
    }
}

/// `notifications-YYYY-MM-DD.<ext>`.
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "notifications-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use notifeed_entity::NotificationType;

    fn sample() -> Vec<Notification> {
        let mut n = Notification::new(
            "event-1",
            NotificationType::Event,
            "Deploy \"v2\", phase 1",
            "line one\nline two",
            Utc.with_ymd_and_hms(2026, 7, 4, 9, 30, 0).unwrap(),
            "events",
        );
        n.read = true;
        vec![n]
    }

    #[test]
    fn test_csv_quotes_special_characters() {
        let csv = export_csv(&sample());
        let mut lines = csv.split("\r\n");
        assert_eq!(lines.next(), Some("id,type,title,message,timestamp,read,source"));
        assert_eq!(
            lines.next(),
            Some(
                "event-1,event,\"Deploy \"\"v2\"\", phase 1\",\"line one\nline two\",2026-07-04T09:30:00+00:00,true,events"
            )
        );
    }

    #[test]
    fn test_json_is_array_of_wire_objects() {
        let json = export(&sample(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "event-1");
        assert_eq!(value[0]["type"], "event");
    }

    #[test]
    fn test_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 4).unwrap();
        assert_eq!(
            export_file_name(ExportFormat::Csv, date),
            "notifications-2026-07-04.csv"
        );
        assert_eq!(ExportFormat::from_str_value("JSON"), Some(ExportFormat::Json));
    }
}
