//! Dismiss, read, snooze, and reset commands.

use clap::Args;

use crate::output;
use notifeed_core::error::AppError;
use notifeed_realtime::MAX_SNOOZE_DAYS;

/// Longest snooze the command accepts.
const MAX_SNOOZE_MINUTES: i64 = MAX_SNOOZE_DAYS * 24 * 60;

/// Arguments for the snooze command
#[derive(Debug, Args)]
pub struct SnoozeArgs {
    /// Notification ID
    pub id: String,

    /// Minutes to hide the notification for
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(i64).range(1..=MAX_SNOOZE_MINUTES))]
    pub minutes: i64,
}

/// Dismiss a single notification
pub async fn dismiss(id: &str, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;
    let retention = &engine.services().retention;
    if retention.is_dismissed(id) {
        output::print_warning(&format!("'{id}' was already dismissed"));
        return Ok(());
    }
    retention.mark_dismissed(id);
    output::print_success(&format!("Dismissed '{id}'"));
    Ok(())
}

/// Mark a single notification read
pub async fn read(id: &str, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;
    engine.services().retention.mark_read(id);
    output::print_success(&format!("Marked '{id}' read"));
    Ok(())
}

/// Mark every fetched notification read
pub async fn read_all(config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;
    engine.refresh().await;
    let count = engine.mark_all_read();
    output::print_success(&format!("Marked {count} notifications read"));
    Ok(())
}

/// Snooze a notification
pub async fn snooze(args: &SnoozeArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;
    let until = engine.snooze(&args.id, chrono::Duration::minutes(args.minutes))?;
    output::print_success(&format!(
        "Snoozed '{}' until {}",
        args.id,
        until
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
    ));
    Ok(())
}

/// Clear every dismissed, read, and snoozed id
pub async fn reset(force: bool, config_path: &str) -> Result<(), AppError> {
    if !force {
        let confirm = dialoguer::Confirm::new()
            .with_prompt("Restore every dismissed, read, and snoozed notification?")
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;
    engine.reset();
    output::print_success("Notification state reset");
    Ok(())
}
