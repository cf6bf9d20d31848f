//! CLI command definitions and dispatch for the `chub` binary.
//!
//! Uses clap derive macros for argument parsing. Chat commands are top-level
//! verbs (`chub add`, `chub open 3`); categories live under `chub category`.

pub mod category;
pub mod chat;
pub mod settings;
pub mod status;
pub mod transfer;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use chathub_types::chat::Theme;

/// Browse and launch your AI chat assistants.
#[derive(Parser)]
#[command(name = "chub", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log errors and skip the server banner. Command results still print.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans to stdout via OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Data directory (defaults to ~/.chathub).
    #[arg(long, global = true, env = "CHATHUB_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List chats, optionally filtered.
    #[command(alias = "ls")]
    List {
        /// Case-insensitive search over name and description.
        #[arg(short, long)]
        query: Option<String>,

        /// Only chats in this category.
        #[arg(short, long)]
        category: Option<String>,

        /// Only favorite chats.
        #[arg(short, long)]
        favorites: bool,
    },

    /// Show details of a chat.
    Show {
        /// Chat id.
        id: String,
    },

    /// Launch a chat in the browser and record the visit.
    Open {
        /// Chat id.
        id: String,

        /// Record the visit and print the URL without opening a browser.
        #[arg(long)]
        no_browser: bool,
    },

    /// Toggle a chat's favorite flag.
    #[command(alias = "fav")]
    Favorite {
        /// Chat id.
        id: String,
    },

    /// Add a chat (prompts for anything not given as a flag).
    Add {
        /// Display name.
        #[arg(long)]
        name: Option<String>,

        /// Chat URL.
        #[arg(long)]
        url: Option<String>,

        /// Short description.
        #[arg(long)]
        description: Option<String>,

        /// Icon name.
        #[arg(long)]
        icon: Option<String>,

        /// Category name.
        #[arg(long)]
        category: Option<String>,

        /// Explicit id (generated when omitted).
        #[arg(long)]
        id: Option<String>,
    },

    /// Edit a chat. Pass an empty string to clear icon or category.
    Edit {
        /// Chat id.
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        icon: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Set the favorite flag explicitly.
        #[arg(long)]
        favorite: Option<bool>,
    },

    /// Delete a chat.
    #[command(alias = "rm")]
    Delete {
        /// Chat id.
        id: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Manage categories (list, add, rename, delete).
    #[command(alias = "cat")]
    Category {
        #[command(subcommand)]
        action: category::CategoryCommand,
    },

    /// Write a dated JSON export of the directory.
    Export {
        /// Directory to write the export into.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Replace the directory with a previously exported JSON file.
    Import {
        /// Path to the export file.
        path: PathBuf,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Show or change the directory title and theme.
    Settings {
        /// New directory title.
        #[arg(long)]
        title: Option<String>,

        /// Theme (light or dark).
        #[arg(long, conflicts_with = "toggle_theme")]
        theme: Option<Theme>,

        /// Switch between light and dark.
        #[arg(long)]
        toggle_theme: bool,
    },

    /// Storage backend and directory status.
    Status,

    /// Start the REST API server.
    Serve {
        /// Port to listen on (defaults to server.port).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to server.host).
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Commands {
    /// Commands that keep running when the stored directory can't be loaded.
    ///
    /// They either report the failure or replace the directory wholesale.
    pub fn tolerates_load_error(&self) -> bool {
        matches!(
            self,
            Commands::Status | Commands::Serve { .. } | Commands::Import { .. }
        )
    }
}
