//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use notifeed_core::error::AppError;
use notifeed_service::ServiceContext;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration and backend selection
    Validate,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => println!("{config:#?}"),
            }
        }
        ConfigCommand::Validate => {
            let checked = super::load_config(config_path)
                .and_then(|config| ServiceContext::from_config(&config).map(|_| config));
            match checked {
                Ok(config) => {
                    output::print_success(&format!("Configuration '{config_path}' is valid"));
                    output::print_kv("Sources", config.sources.enabled.join(", "));
                    output::print_kv("Base URL", &config.sources.base_url);
                    output::print_kv("Store", &config.store.provider);
                    output::print_kv(
                        "Delivery",
                        format!(
                            "audio={} desktop={}",
                            config.delivery.audio_backend, config.delivery.desktop_backend
                        ),
                    );
                }
                Err(e) => {
                    output::print_error(&format!("Configuration invalid: {e}"));
                    return Err(e);
                }
            }
        }
    }

    Ok(())
}
