//! Chathub CLI and REST API entry point.
//!
//! Binary name: `chub`
//!
//! Parses CLI arguments, opens the configured storage backend, loads the
//! directory, then dispatches to the command handler or starts the server.

mod cli;
mod http;
mod state;

use anyhow::Context;
use clap::Parser;
use clap_complete::generate;

use chathub_infra::filesystem::resolve_data_dir;
use chathub_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};
use chathub_types::chat::ChatUpdate;
use chathub_types::filter::ChatFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "chub", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = cli.data_dir.clone().unwrap_or_else(resolve_data_dir);
    let state = AppState::init(&data_dir).await?;

    if let Err(e) = state.load().await {
        if !cli.command.tolerates_load_error() {
            return Err(e).context("failed to load the chat directory");
        }
        tracing::warn!("Continuing without the stored directory: {e}");
    }

    let json = cli.json;

    match cli.command {
        Commands::List {
            query,
            category,
            favorites,
        } => {
            let filter = ChatFilter {
                query: query.unwrap_or_default(),
                category,
                favorites_only: favorites,
            };
            cli::chat::list_chats(&state, filter, json).await?;
        }

        Commands::Show { id } => {
            cli::chat::show_chat(&state, &id, json).await?;
        }

        Commands::Open { id, no_browser } => {
            cli::chat::open_chat(&state, &id, no_browser, json).await?;
        }

        Commands::Favorite { id } => {
            cli::chat::toggle_favorite(&state, &id, json).await?;
        }

        Commands::Add {
            name,
            url,
            description,
            icon,
            category,
            id,
        } => {
            let args = cli::chat::AddArgs {
                id,
                name,
                url,
                description,
                icon,
                category,
            };
            cli::chat::add_chat(&state, args, json).await?;
        }

        Commands::Edit {
            id,
            name,
            url,
            description,
            icon,
            category,
            favorite,
        } => {
            let update = ChatUpdate {
                name,
                description,
                url,
                icon,
                category,
                favorite,
            };
            cli::chat::edit_chat(&state, &id, update, json).await?;
        }

        Commands::Delete { id, force } => {
            cli::chat::delete_chat(&state, &id, force, json).await?;
        }

        Commands::Category { action } => {
            cli::category::handle_category_command(action, &state, json).await?;
        }

        Commands::Export { dir } => {
            cli::transfer::export(&state, &dir, json).await?;
        }

        Commands::Import { path, force } => {
            cli::transfer::import(&state, &path, force, json).await?;
        }

        Commands::Settings {
            title,
            theme,
            toggle_theme,
        } => {
            cli::settings::settings(&state, title, theme, toggle_theme, json).await?;
        }

        Commands::Status => {
            cli::status::status(&state, json).await?;
        }

        Commands::Serve { port, host } => {
            let host = host.unwrap_or_else(|| state.settings.server.host.clone());
            let port = port.unwrap_or(state.settings.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;

            if !cli.quiet {
                println!(
                    "  {} Chathub API listening on {}",
                    console::style("◆").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                if let Some(error) = state.directory.error().await {
                    println!("  {} {}", console::style("!").yellow().bold(), error);
                }
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
