//! Directory title and theme.

use anyhow::Result;
use console::style;

use chathub_types::chat::Theme;

use crate::state::AppState;

/// Show the title and theme, or change them when any option is given.
pub async fn settings(
    state: &AppState,
    title: Option<String>,
    theme: Option<Theme>,
    toggle_theme: bool,
    json: bool,
) -> Result<()> {
    let changed = title.is_some() || theme.is_some() || toggle_theme;

    if title.is_some() || theme.is_some() {
        state.directory.update_display(title.as_deref(), theme).await?;
    }
    if toggle_theme {
        state.directory.toggle_theme().await?;
    }

    let config = state.directory.config().await;

    if json {
        println!(
            "{}",
            serde_json::json!({ "title": config.title, "theme": config.theme })
        );
        return Ok(());
    }

    if changed {
        println!("  {} Settings updated", style("✓").green().bold());
    }
    println!("  {}  {}", style("Title:").bold(), style(&config.title).cyan());
    println!("  {}  {}", style("Theme:").bold(), config.theme);
    Ok(())
}
