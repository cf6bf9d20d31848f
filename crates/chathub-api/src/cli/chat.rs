//! Chat entry commands: list, show, open, favorite, add, edit, delete.

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::{Confirm, Input, Select};

use chathub_types::chat::{ChatItem, ChatUpdate, NewChat};
use chathub_types::filter::ChatFilter;

use crate::state::AppState;

/// Fields for `chub add`. Without both name and URL the rest is prompted for.
pub struct AddArgs {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
}

/// List chats in a table, narrowed by the given filter.
pub async fn list_chats(state: &AppState, filter: ChatFilter, json: bool) -> Result<()> {
    state.directory.set_search_query(filter.query.clone()).await;
    state.directory.set_active_category(filter.category.clone()).await;
    state.directory.set_show_favorites(filter.favorites_only).await;

    let view = state.directory.snapshot().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&view.filtered)?);
        return Ok(());
    }

    if view.filtered.is_empty() {
        println!();
        println!(
            "  {} {}",
            style("i").blue().bold(),
            view.filter.empty_message()
        );
        if !view.filter.is_active() {
            println!("  Add one with: {}", style("chub add").yellow());
        }
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Category").fg(Color::White),
        Cell::new("Description").fg(Color::White),
        Cell::new("Last Visited").fg(Color::White),
    ]);

    for chat in &view.filtered {
        let name = if chat.favorite {
            Cell::new(format!("★ {}", chat.name)).fg(Color::Yellow)
        } else {
            Cell::new(&chat.name)
        };

        let category = match view.config.effective_category(chat) {
            Some(c) => Cell::new(c).fg(Color::Cyan),
            None => Cell::new("-").fg(Color::DarkGrey),
        };

        let last_visited = match &chat.last_visited {
            Some(dt) => format_relative_time(dt),
            None => "never".to_string(),
        };

        table.add_row(vec![
            Cell::new(&chat.id).fg(Color::DarkGrey),
            name,
            category,
            Cell::new(truncate(&chat.description, 48)),
            Cell::new(last_visited).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("  {}", style(&view.config.title).bold());
    println!("{table}");
    println!(
        "  {} of {} chat(s), {} favorite(s)",
        view.filtered.len(),
        view.config.chats.len(),
        view.config.favorite_count()
    );
    println!();

    Ok(())
}

/// Show one chat.
pub async fn show_chat(state: &AppState, id: &str, json: bool) -> Result<()> {
    let chat = state.directory.get_chat(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chat)?);
        return Ok(());
    }

    let config = state.directory.config().await;
    print_chat(&chat, config.effective_category(&chat));
    Ok(())
}

fn print_chat(chat: &ChatItem, category: Option<&str>) {
    println!();
    let star = if chat.favorite {
        format!(" {}", style("★").yellow())
    } else {
        String::new()
    };
    println!("  {}{}", style(&chat.name).bold().cyan(), star);
    if !chat.description.is_empty() {
        println!("  {}", style(&chat.description).dim());
    }
    println!();
    println!("  {}       {}", style("ID:").bold(), style(&chat.id).dim());
    println!("  {}      {}", style("URL:").bold(), style(&chat.url).underlined());
    println!(
        "  {} {}",
        style("Category:").bold(),
        category.unwrap_or("-")
    );
    if let Some(icon) = &chat.icon {
        println!("  {}     {}", style("Icon:").bold(), icon);
    }
    println!(
        "  {}  {}",
        style("Visited:").bold(),
        chat.last_visited
            .as_ref()
            .map(format_relative_time)
            .unwrap_or_else(|| "never".to_string())
    );
    println!();
}

/// Record a visit and open the chat URL in the default browser.
pub async fn open_chat(state: &AppState, id: &str, no_browser: bool, json: bool) -> Result<()> {
    let url = state.directory.launch(id).await?;

    if !no_browser {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open browser: {e}");
            eprintln!(
                "  {} Could not open a browser, visit {} manually",
                style("!").yellow().bold(),
                style(&url).cyan()
            );
        }
    }

    if json {
        println!("{}", serde_json::json!({ "id": id, "url": url }));
    } else {
        println!("  {} {}", style("→").green().bold(), style(&url).cyan());
    }
    Ok(())
}

/// Flip a chat's favorite flag.
pub async fn toggle_favorite(state: &AppState, id: &str, json: bool) -> Result<()> {
    let chat = state.directory.toggle_favorite(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chat)?);
    } else if chat.favorite {
        println!(
            "  {} Added '{}' to favorites",
            style("★").yellow(),
            style(&chat.name).cyan()
        );
    } else {
        println!(
            "  {} Removed '{}' from favorites",
            style("☆").dim(),
            style(&chat.name).cyan()
        );
    }
    Ok(())
}

/// Add a chat via interactive prompts or one-shot flags.
pub async fn add_chat(state: &AppState, args: AddArgs, json: bool) -> Result<()> {
    let interactive = args.name.is_none() || args.url.is_none();

    let name = match args.name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("Chat name")
            .interact_text()?,
    };

    let url = match args.url {
        Some(u) => u,
        None => Input::<String>::new()
            .with_prompt("Chat URL")
            .interact_text()?,
    };

    let description = match args.description {
        Some(d) => d,
        None if interactive => Input::<String>::new()
            .with_prompt("Short description")
            .allow_empty(true)
            .interact_text()?,
        None => String::new(),
    };

    let category = match args.category {
        Some(c) => Some(c),
        None if interactive => pick_category(state).await?,
        None => None,
    };

    let chat = state
        .directory
        .add_chat(NewChat {
            id: args.id,
            name,
            description,
            url,
            icon: args.icon,
            category,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chat)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Added {}",
        style("✓").green().bold(),
        style(&chat.name).cyan().bold()
    );
    println!("  {}  {}", style("ID:").bold(), style(&chat.id).dim());
    println!(
        "  Launch it with: {}",
        style(format!("chub open {}", chat.id)).yellow()
    );
    println!();
    Ok(())
}

/// Ask for a category from the existing list; `None` for uncategorized.
async fn pick_category(state: &AppState) -> Result<Option<String>> {
    let categories = state.directory.categories().await;
    if categories.is_empty() {
        return Ok(None);
    }

    let mut items = vec!["(none)".to_string()];
    items.extend(categories.iter().cloned());
    let choice = Select::new()
        .with_prompt("Category")
        .items(&items)
        .default(0)
        .interact()?;

    Ok((choice > 0).then(|| items[choice].clone()))
}

/// Apply a partial edit to a chat.
pub async fn edit_chat(state: &AppState, id: &str, update: ChatUpdate, json: bool) -> Result<()> {
    if update.name.is_none()
        && update.url.is_none()
        && update.description.is_none()
        && update.icon.is_none()
        && update.category.is_none()
        && update.favorite.is_none()
    {
        anyhow::bail!(
            "nothing to change: pass at least one of \
             --name, --url, --description, --icon, --category, --favorite"
        );
    }

    let chat = state.directory.update_chat(id, update).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&chat)?);
        return Ok(());
    }

    println!(
        "  {} Updated {}",
        style("✓").green().bold(),
        style(&chat.name).cyan()
    );
    Ok(())
}

/// Delete a chat, confirming first unless `force`.
pub async fn delete_chat(state: &AppState, id: &str, force: bool, json: bool) -> Result<()> {
    let chat = state.directory.get_chat(id).await?;

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete chat '{}'?",
                style(&chat.name).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let removed = state.directory.delete_chat(id).await?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "deleted": true, "id": removed.id, "name": removed.name })
        );
    } else {
        println!(
            "  {} Deleted '{}'",
            style("✓").green().bold(),
            removed.name
        );
    }
    Ok(())
}

pub(crate) fn format_relative_time(dt: &chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let diff = now - *dt;

    if diff.num_minutes() < 1 {
        "just now".to_string()
    } else if diff.num_hours() < 1 {
        format!("{}m ago", diff.num_minutes())
    } else if diff.num_days() < 1 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_days() < 30 {
        format!("{}d ago", diff.num_days())
    } else {
        dt.format("%Y-%m-%d").to_string()
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(format_relative_time(&(now - Duration::minutes(5))), "5m ago");
        assert_eq!(format_relative_time(&(now - Duration::hours(3))), "3h ago");
        assert_eq!(format_relative_time(&(now - Duration::days(2))), "2d ago");

        let old = now - Duration::days(90);
        assert_eq!(format_relative_time(&old), old.format("%Y-%m-%d").to_string());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
        assert_eq!(truncate("über straße", 6), "über…");
    }

    #[tokio::test]
    async fn test_edit_chat_requires_a_change() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut settings = chathub_types::settings::Settings::default();
        settings.storage.backend = chathub_types::settings::StorageBackend::File;
        let state = AppState::with_settings(settings, dir.path()).await.unwrap();
        state.load().await.unwrap();

        let err = edit_chat(&state, "1", ChatUpdate::default(), true)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "nothing to change: pass at least one of \
             --name, --url, --description, --icon, --category, --favorite"
        );
        assert_eq!(
            state.directory.get_chat("1").await.unwrap(),
            chathub_types::chat::default_config().chats[0]
        );
    }
}
