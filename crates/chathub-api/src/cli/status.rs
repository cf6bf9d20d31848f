//! Directory status dashboard command.

use anyhow::Result;
use console::style;

use chathub_core::storage::config_store::ConfigStore;

use crate::cli::chat::format_relative_time;
use crate::state::AppState;

/// Display the status dashboard.
///
/// Shows chat and category counts, the storage backend, the most recent
/// visit and any load or save error.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let view = state.directory.snapshot().await;
    let config = &view.config;

    let favorites = config.favorite_count();
    let uncategorized = config
        .chats
        .iter()
        .filter(|c| config.effective_category(c).is_none())
        .count();
    let last_visit = config
        .chats
        .iter()
        .filter_map(|c| c.last_visited.map(|at| (c, at)))
        .max_by_key(|(_, at)| *at);

    let backend = state.settings.storage.backend.to_string();
    let store = state.directory.store().describe();

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "backend": backend,
            "store": store,
            "title": config.title,
            "theme": config.theme,
            "chats": {
                "total": config.chats.len(),
                "favorites": favorites,
                "uncategorized": uncategorized,
            },
            "categories": view.categories.len(),
            "last_visit": last_visit.map(|(c, at)| serde_json::json!({ "id": c.id, "at": at })),
            "error": view.error,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Chathub v{}",
        style("◆").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Chats ──").dim());
    println!("  Title:         {}", style(&config.title).bold());
    println!("  Total:         {}", style(config.chats.len()).bold());
    println!("  Favorites:     {}", style(favorites).yellow());
    if uncategorized > 0 {
        println!("  Uncategorized: {}", style(uncategorized).dim());
    }
    println!("  Categories:    {}", view.categories.len());
    match last_visit {
        Some((chat, at)) => println!(
            "  Last visit:    {} ({})",
            style(&chat.name).cyan(),
            format_relative_time(&at)
        ),
        None => println!("  Last visit:    {}", style("never").dim()),
    }
    println!();

    println!("  {}", style("── Storage ──").dim());
    println!("  Backend:  {}", style(&backend).bold());
    println!("  Store:    {}", style(&store).dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    match &view.error {
        Some(error) => println!("  Status:   {}", style(error).red()),
        None => println!("  Status:   {}", style("ok").green()),
    }
    println!();

    Ok(())
}
