//! Category CLI subcommands.
//!
//! Renaming a category moves its chats along; deleting one leaves its chats
//! uncategorized.

use anyhow::Result;
use clap::Subcommand;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::Confirm;

use chathub_types::filter::ChatFilter;

use crate::state::AppState;

/// Category subcommands.
#[derive(Subcommand)]
pub enum CategoryCommand {
    /// List categories with their chat counts.
    #[command(alias = "ls")]
    List,

    /// Add a category.
    Add {
        /// Category name.
        name: String,
    },

    /// Rename a category (chats in it follow).
    Rename {
        /// Current name.
        old: String,

        /// New name.
        new: String,
    },

    /// Delete a category (chats in it become uncategorized).
    #[command(alias = "rm")]
    Delete {
        /// Category name.
        name: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },
}

/// Handle a category subcommand.
pub async fn handle_category_command(
    cmd: CategoryCommand,
    state: &AppState,
    json: bool,
) -> Result<()> {
    match cmd {
        CategoryCommand::List => list_categories(state, json).await,
        CategoryCommand::Add { name } => add_category(state, &name, json).await,
        CategoryCommand::Rename { old, new } => rename_category(state, &old, &new, json).await,
        CategoryCommand::Delete { name, force } => delete_category(state, &name, force, json).await,
    }
}

async fn list_categories(state: &AppState, json: bool) -> Result<()> {
    let config = state.directory.config().await;
    let counts: Vec<(String, usize)> = state
        .directory
        .categories()
        .await
        .into_iter()
        .map(|name| {
            let filter = ChatFilter {
                category: Some(name.clone()),
                ..Default::default()
            };
            let count = filter.apply(&config).len();
            (name, count)
        })
        .collect();

    if json {
        let items: Vec<_> = counts
            .iter()
            .map(|(name, count)| serde_json::json!({ "name": name, "chats": count }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if counts.is_empty() {
        println!();
        println!(
            "  {} No categories yet. Add one with: {}",
            style("i").blue().bold(),
            style("chub category add <name>").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Category").fg(Color::White),
        Cell::new("Chats").fg(Color::White),
    ]);

    for (name, count) in &counts {
        let count_cell = if *count == 0 {
            Cell::new(count).fg(Color::DarkGrey)
        } else {
            Cell::new(count)
        };
        table.add_row(vec![Cell::new(name).fg(Color::Cyan), count_cell]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

async fn add_category(state: &AppState, name: &str, json: bool) -> Result<()> {
    let categories = state.directory.add_category(name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        println!(
            "  {} Added category '{}'",
            style("✓").green().bold(),
            style(name.trim()).cyan()
        );
    }
    Ok(())
}

async fn rename_category(state: &AppState, old: &str, new: &str, json: bool) -> Result<()> {
    let categories = state.directory.rename_category(old, new).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        println!(
            "  {} Renamed '{}' to '{}'",
            style("✓").green().bold(),
            old,
            style(new.trim()).cyan()
        );
    }
    Ok(())
}

async fn delete_category(state: &AppState, name: &str, force: bool, json: bool) -> Result<()> {
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete category '{}'? Its chats will become uncategorized.",
                style(name).red().bold()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("  Cancelled.");
            return Ok(());
        }
    }

    let categories = state.directory.delete_category(name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        println!(
            "  {} Deleted category '{}'",
            style("✓").green().bold(),
            name
        );
    }
    Ok(())
}
