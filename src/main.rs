//! Hotspot dashboard shell.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                  SHELL                       │
//!   Browser          │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│ routing  │───▶│  views  │  │
//!                    │  │ server  │    │ resolver │    │  cache  │  │
//!                    │  └─────────┘    └──────────┘    └────┬────┘  │
//!                    │       ▲                              │       │
//!   ◀────────────────┼───────┴──────── response ◀───────────┘       │
//!                    │                                              │
//!                    │  config · lifecycle · observability · store  │
//!                    │  registry (widgets, icons) · theme           │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use hotspot_dashboard::config::{watcher::ConfigWatcher, AppConfig};
use hotspot_dashboard::lifecycle::{signals, App, Bootstrap, Shutdown};
use hotspot_dashboard::observability::{logging, metrics};
use hotspot_dashboard::routing::NavigationOutcome;

#[derive(Debug, Parser)]
#[command(name = "hotspot-dashboard", version, about = "Hotspot event polarization dashboard")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "dashboard.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the dashboard (default).
    Serve,
    /// Print the navigation table.
    Routes,
    /// Resolve one path and print the result.
    Resolve { path: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let found = cli.config.exists();
    let bootstrap = Bootstrap::load(&cli.config)?;
    let config = bootstrap.config().clone();

    logging::init(&config.observability)?;
    if !found {
        tracing::warn!(path = ?cli.config, "Config file not found, using defaults");
    }

    tracing::info!(
        bind_address = %config.server.bind_address,
        hot_reload = config.server.hot_reload,
        views = ?config.views.dir,
        "Configuration loaded"
    );

    let app = bootstrap.build()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Routes => print_routes(&app),
        Command::Resolve { path } => resolve(&app, &path).await?,
        Command::Serve => serve(app, &cli.config, found, config).await?,
    }
    Ok(())
}

fn print_routes(app: &App) {
    println!("{:<18} {:<14} {:<14} TITLE", "NAME", "PATH", "ICON");
    for route in app.resolver().manifest() {
        println!(
            "{:<18} {:<14} {:<14} {}",
            route.name,
            route.path,
            route.icon.as_deref().unwrap_or("-"),
            route.title.as_deref().unwrap_or("-"),
        );
    }
}

async fn resolve(app: &App, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    match app.navigator().push(path).await? {
        NavigationOutcome::Displayed(displayed) => {
            let route = &displayed.route;
            println!("route:  {}", route.name().unwrap_or("-"));
            println!("title:  {}", route.title().unwrap_or("-"));
            println!("trail:  {}", route.breadcrumbs().join(" / "));
            for (key, value) in route.params() {
                println!("param:  {} = {}", key, value);
            }
            let views: Vec<&str> = displayed.views.iter().map(|v| v.name()).collect();
            println!("views:  {}", views.join(" > "));
        }
        NavigationOutcome::Superseded { .. } => {
            tracing::warn!(path = %path, "Navigation superseded");
        }
    }
    Ok(())
}

async fn serve(
    app: App,
    config_path: &Path,
    watch: bool,
    config: AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.server.clear_screen {
        print!("\x1B[2J\x1B[1;1H");
    }

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let mounted = app.mount().await?;
    tracing::info!(address = %mounted.local_addr()?, "Listening for connections");

    // The watcher handle stops watching when dropped
    let (config_updates, _watcher) = if watch && config.server.hot_reload {
        let (watcher, updates) = ConfigWatcher::new(config_path);
        (updates, Some(watcher.run(&config.server)?))
    } else {
        let (_, updates) = mpsc::unbounded_channel();
        (updates, None)
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    mounted.run(config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
