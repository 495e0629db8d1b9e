//! Preference inspection and updates.

use chrono::{NaiveTime, Timelike};
use clap::{Args, Subcommand};
use serde_json::json;

use crate::output::{self, OutputFormat};
use notifeed_core::error::AppError;
use notifeed_core::traits::NotificationPermission;
use notifeed_entity::SoundType;
use notifeed_entity::preference::{DesktopPrefsPatch, DndPrefsPatch, SoundPrefsPatch};
use notifeed_realtime::NotificationEngine;

/// Arguments for prefs commands
#[derive(Debug, Args)]
pub struct PrefsArgs {
    /// Prefs subcommand
    #[command(subcommand)]
    pub command: PrefsCommand,
}

/// Prefs subcommands
#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Show every preference
    Show,
    /// Update sound preferences
    Sound {
        /// Play a sound on new notifications
        #[arg(long)]
        enabled: Option<bool>,
        /// Sound to play (none, subtle, chime, alert)
        #[arg(long = "type", value_parser = parse_sound)]
        sound_type: Option<SoundType>,
        /// Volume between 0 and 1
        #[arg(long)]
        volume: Option<f32>,
    },
    /// Update desktop notification preferences
    Desktop {
        /// Show desktop notices; enabling requests permission
        #[arg(long)]
        enabled: Option<bool>,
        /// Include the message body in notices
        #[arg(long)]
        show_preview: Option<bool>,
    },
    /// Update do-not-disturb preferences
    Dnd {
        /// Master switch
        #[arg(long)]
        enabled: Option<bool>,
        /// Only mute inside the daily window
        #[arg(long)]
        schedule_enabled: Option<bool>,
        /// Window start (HH:MM)
        #[arg(long, value_parser = parse_time)]
        start: Option<NaiveTime>,
        /// Window end (HH:MM)
        #[arg(long, value_parser = parse_time)]
        end: Option<NaiveTime>,
        /// Let urgent notifications through
        #[arg(long)]
        allow_urgent: Option<bool>,
    },
}

fn parse_sound(s: &str) -> Result<SoundType, String> {
    SoundType::from_str_value(s)
        .ok_or_else(|| format!("unknown sound '{s}' (none, subtle, chime, alert)"))
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s, "%H:%M").map_err(|e| format!("expected HH:MM: {e}"))
}

/// Execute prefs commands
pub async fn execute(
    args: &PrefsArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;
    let services = engine.services();

    match &args.command {
        PrefsCommand::Show => {}
        PrefsCommand::Sound {
            enabled,
            sound_type,
            volume,
        } => {
            services.sound.update_prefs(&SoundPrefsPatch {
                enabled: *enabled,
                sound_type: *sound_type,
                volume: *volume,
            });
            output::print_success("Sound preferences updated");
        }
        PrefsCommand::Desktop {
            enabled,
            show_preview,
        } => {
            if *enabled == Some(true) && !request_permission(&engine).await {
                return Err(AppError::unsupported(
                    "Desktop notifications are not permitted on this platform",
                ));
            }
            services.desktop.update_prefs(&DesktopPrefsPatch {
                enabled: *enabled,
                show_preview: *show_preview,
            });
            output::print_success("Desktop preferences updated");
        }
        PrefsCommand::Dnd {
            enabled,
            schedule_enabled,
            start,
            end,
            allow_urgent,
        } => {
            services.dnd.update_prefs(&DndPrefsPatch {
                enabled: *enabled,
                schedule_enabled: *schedule_enabled,
                start_hour: start.map(|t| t.hour()),
                start_minute: start.map(|t| t.minute()),
                end_hour: end.map(|t| t.hour()),
                end_minute: end.map(|t| t.minute()),
                allow_urgent: *allow_urgent,
            });
            output::print_success("Quiet-hours preferences updated");
        }
    }

    show(&engine, format);
    Ok(())
}

async fn request_permission(engine: &NotificationEngine) -> bool {
    let desktop = &engine.services().desktop;
    if desktop.permission() == NotificationPermission::Granted {
        return true;
    }
    desktop.request_permission().await == NotificationPermission::Granted
}

fn show(engine: &NotificationEngine, format: OutputFormat) {
    let services = engine.services();
    let sound = services.sound.prefs();
    let desktop = services.desktop.prefs();
    let dnd = services.dnd.prefs();

    if format == OutputFormat::Json {
        output::print_json(&json!({
            "sound": sound,
            "desktop": desktop,
            "desktopPermission": services.desktop.permission(),
            "dnd": dnd,
            "filter": services.view.filter(),
            "groupMode": services.view.group_mode(),
        }));
        return;
    }

    output::print_heading("Sound");
    output::print_kv("Enabled", output::check(sound.enabled));
    output::print_kv("Type", sound.sound_type.as_str());
    output::print_kv("Volume", format!("{:.2}", sound.volume));

    output::print_heading("Desktop");
    output::print_kv("Enabled", output::check(desktop.enabled));
    output::print_kv("Show preview", output::check(desktop.show_preview));
    output::print_kv("Permission", format!("{:?}", services.desktop.permission()));

    output::print_heading("Do not disturb");
    output::print_kv("Enabled", output::check(dnd.enabled));
    output::print_kv("Scheduled", output::check(dnd.schedule_enabled));
    output::print_kv(
        "Window",
        format!(
            "{:02}:{:02}-{:02}:{:02}",
            dnd.start_hour, dnd.start_minute, dnd.end_hour, dnd.end_minute
        ),
    );
    output::print_kv("Allow urgent", output::check(dnd.allow_urgent));

    output::print_heading("View");
    output::print_kv("Filter", services.view.filter().as_str());
    output::print_kv("Group by", services.view.group_mode().as_str());
}
