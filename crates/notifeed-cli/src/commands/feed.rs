//! Feed listing.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use notifeed_core::error::AppError;
use notifeed_entity::{FeedFilter, GroupMode, Notification};
use notifeed_realtime::badge_label;

/// Arguments for the feed command
#[derive(Debug, Args)]
pub struct FeedArgs {
    /// Filter to apply and remember (all, unread, agents)
    #[arg(long, value_parser = super::parse_filter)]
    pub filter: Option<FeedFilter>,

    /// Grouping to apply and remember (none, type, source)
    #[arg(long, value_parser = super::parse_group)]
    pub group: Option<GroupMode>,
}

/// Notification display row
#[derive(Debug, Serialize, Tabled)]
pub struct NotificationRow {
    /// Notification ID
    #[tabled(rename = "ID")]
    pub id: String,
    /// Type
    #[tabled(rename = "Type")]
    pub kind: String,
    /// Title
    #[tabled(rename = "Title")]
    pub title: String,
    /// Source
    #[tabled(rename = "Source")]
    pub source: String,
    /// When
    #[tabled(rename = "When")]
    pub when: String,
    /// Read
    #[tabled(rename = "Read")]
    pub read: String,
}

impl From<&Notification> for NotificationRow {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.clone(),
            kind: n.kind.as_str().to_string(),
            title: n.title.clone(),
            source: n.source.clone(),
            when: n
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            read: output::check(n.read).to_string(),
        }
    }
}

/// Execute the feed command
pub async fn execute(
    args: &FeedArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;
    if let Some(filter) = args.filter {
        engine.set_filter(filter);
    }
    if let Some(mode) = args.group {
        engine.set_group_mode(mode);
    }

    engine.refresh().await;
    let snapshot = engine.snapshot();

    if format == OutputFormat::Json {
        output::print_json(&snapshot);
        return Ok(());
    }

    let badge = badge_label(snapshot.unread_count, config.feed.badge_cap)
        .unwrap_or_else(|| "0".to_string());
    output::print_heading(&format!(
        "{} unread · {} shown · filter {} · group {}",
        badge,
        snapshot.visible.len(),
        snapshot.filter.as_str(),
        snapshot.group_mode.as_str(),
    ));

    if !snapshot.group_mode.is_grouped() {
        let rows: Vec<NotificationRow> = snapshot.visible.iter().map(Into::into).collect();
        output::print_list(&rows, format);
        return Ok(());
    }

    if snapshot.groups.is_empty() {
        println!("No notifications.");
    }
    for group in &snapshot.groups {
        println!();
        output::print_heading(&format!(
            "{} ({} unread / {})",
            group.label,
            group.unread_count,
            group.len()
        ));
        let rows: Vec<NotificationRow> = group.notifications.iter().map(Into::into).collect();
        output::print_list(&rows, format);
    }
    Ok(())
}
