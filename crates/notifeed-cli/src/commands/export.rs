//! Feed export.

use std::path::PathBuf;

use clap::Args;

use crate::output;
use notifeed_core::error::AppError;
use notifeed_service::ExportFormat;
use notifeed_service::export::{export, export_file_name};

/// Arguments for the export command
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// File format (json, csv)
    #[arg(long, value_parser = parse_format)]
    pub format: ExportFormat,

    /// Output path; `-` writes to stdout. Defaults to a dated file name.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    ExportFormat::from_str_value(s)
        .ok_or_else(|| format!("unknown export format '{s}' (json, csv)"))
}

/// Execute the export command
pub async fn execute(args: &ExportArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let engine = super::build_engine(&config)?;
    engine.refresh().await;

    let snapshot = engine.snapshot();
    let body = export(&snapshot.visible, args.format)?;

    let path = match &args.out {
        Some(path) if path.as_os_str() == "-" => {
            print!("{body}");
            return Ok(());
        }
        Some(path) => path.clone(),
        None => PathBuf::from(export_file_name(
            args.format,
            chrono::Local::now().date_naive(),
        )),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&path, body).await?;

    output::print_success(&format!(
        "Exported {} notifications to '{}'",
        snapshot.visible.len(),
        path.display()
    ));
    Ok(())
}
