//! CLI command definitions and dispatch.

pub mod actions;
pub mod config;
pub mod export;
pub mod feed;
pub mod prefs;
pub mod quiet;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use notifeed_core::config::AppConfig;
use notifeed_core::error::AppError;
use notifeed_entity::{FeedFilter, GroupMode};
use notifeed_realtime::NotificationEngine;
use notifeed_service::ServiceContext;

/// Notifeed: unified notification feed
#[derive(Debug, Parser)]
#[command(name = "notifeed", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch and show the feed
    Feed(feed::FeedArgs),
    /// Write the filtered feed to a JSON or CSV file
    Export(export::ExportArgs),
    /// Dismiss a notification
    Dismiss {
        /// Notification ID
        id: String,
    },
    /// Mark a notification read
    Read {
        /// Notification ID
        id: String,
    },
    /// Mark every notification in the feed read
    ReadAll,
    /// Hide a notification for a while
    Snooze(actions::SnoozeArgs),
    /// Forget every dismissed, read, and snoozed notification
    Reset {
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Show or change sound, desktop, and quiet-hours preferences
    Prefs(prefs::PrefsArgs),
    /// Show whether delivery is currently muted
    Quiet,
    /// Play the configured notification sound
    TestSound,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Feed(args) => feed::execute(args, &self.config, self.format).await,
            Commands::Export(args) => export::execute(args, &self.config).await,
            Commands::Dismiss { id } => actions::dismiss(id, &self.config).await,
            Commands::Read { id } => actions::read(id, &self.config).await,
            Commands::ReadAll => actions::read_all(&self.config).await,
            Commands::Snooze(args) => actions::snooze(args, &self.config).await,
            Commands::Reset { force } => actions::reset(*force, &self.config).await,
            Commands::Prefs(args) => prefs::execute(args, &self.config, self.format).await,
            Commands::Quiet => quiet::quiet(&self.config, self.format).await,
            Commands::TestSound => quiet::test_sound(&self.config).await,
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Helper: build the engine over the configured store, platform, and sources
pub fn build_engine(config: &AppConfig) -> Result<Arc<NotificationEngine>, AppError> {
    let services = ServiceContext::from_config(config)?;
    Ok(NotificationEngine::new(services))
}

/// Parses a `--filter` value.
pub fn parse_filter(s: &str) -> Result<FeedFilter, String> {
    FeedFilter::from_str_value(s)
        .ok_or_else(|| format!("unknown filter '{s}' (all, unread, agents)"))
}

/// Parses a `--group` value.
pub fn parse_group(s: &str) -> Result<GroupMode, String> {
    GroupMode::from_str_value(s)
        .ok_or_else(|| format!("unknown group mode '{s}' (none, type, source)"))
}
