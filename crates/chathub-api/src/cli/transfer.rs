//! Export and import of the whole directory as a JSON file.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};

use chathub_infra::file::{export_config, import_config};

use crate::state::AppState;

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Write `chat-config-YYYY-MM-DD.json` into `dir`.
pub async fn export(state: &AppState, dir: &Path, json: bool) -> Result<()> {
    let config = state.directory.config().await;
    let path = export_config(&config, dir)
        .await
        .with_context(|| format!("failed to export to {}", dir.display()))?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "path": path.display().to_string(), "chats": config.chats.len() })
        );
    } else {
        println!(
            "  {} Exported {} chat(s) to {}",
            style("✓").green().bold(),
            config.chats.len(),
            style(path.display()).cyan()
        );
    }
    Ok(())
}

/// Replace the directory with the contents of an export file.
pub async fn import(state: &AppState, path: &Path, force: bool, json: bool) -> Result<()> {
    let config = import_config(path)
        .await
        .with_context(|| format!("failed to import {}", path.display()))?;

    if !force {
        let current = state.directory.config().await;
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Replace {} chat(s) with {} chat(s) from {}?",
                current.chats.len(),
                config.chats.len(),
                style(path.display()).cyan()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let progress = (!json).then(|| spinner("Saving imported directory..."));
    let result = state.directory.replace_config(config).await;
    if let Some(progress) = progress {
        progress.finish_and_clear();
    }
    let imported = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&imported)?);
    } else {
        println!(
            "  {} Imported '{}' with {} chat(s)",
            style("✓").green().bold(),
            style(&imported.title).cyan(),
            imported.chats.len()
        );
    }
    Ok(())
}
