//! Quiet-hours status and sound check.

use serde_json::json;

use crate::output::{self, OutputFormat};
use notifeed_core::error::AppError;

/// Show whether delivery is currently muted
pub async fn quiet(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;
    let dnd = &engine.services().dnd;

    let in_window = dnd.is_in_quiet_hours();
    let muted = dnd.is_muted(false);
    let urgent_muted = dnd.is_muted(true);

    if format == OutputFormat::Json {
        output::print_json(&json!({
            "inQuietHours": in_window,
            "muted": muted,
            "urgentMuted": urgent_muted,
        }));
        return Ok(());
    }

    output::print_kv("In quiet hours", output::check(in_window));
    output::print_kv("Muted", output::check(muted));
    output::print_kv("Urgent muted", output::check(urgent_muted));
    Ok(())
}

/// Play the configured sound regardless of the enabled switch
pub async fn test_sound(config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;
    let sound = &engine.services().sound;

    if !sound.test_sound() {
        output::print_warning("No sound played (sound type is none or audio is unavailable)");
        return Ok(());
    }

    // Let the device release before exiting.
    tokio::time::sleep(std::time::Duration::from_millis(
        config.delivery.audio_release_delay_ms + 500,
    ))
    .await;
    output::print_success(&format!("Played '{}'", sound.prefs().sound_type.as_str()));
    Ok(())
}
