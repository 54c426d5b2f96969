//! Calorie Tracker server
//!
//! # Configuration
//!
//! Environment variables:
//! - `CALORIES_PORT`: Port to listen on (default: 3000)
//! - `CALORIES_DATA_FILE`: JSON store file (default: ~/.local/share/calorie-tracker/calories.json)
//! - `CALORIES_STATIC_DIR`: Front end directory (default: ./public)
//! - `CALORIES_CONFIG`: Path to config file (default: ~/.config/calorie-tracker/config.yaml)
//!
//! Command line flags override both.
//!
//! # Config File Format
//!
//! ```yaml
//! port: 3000
//! data_file: /home/me/calories.json
//! static_dir: /usr/share/calorie-tracker/public
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use calorie_tracker::{init_repository, router, AppState, Config};

#[derive(Parser)]
#[command(name = "calorie-tracker")]
#[command(version)]
#[command(about = "A local daily calorie tracking server", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Port to listen on
    #[arg(long, short)]
    port: Option<u16>,

    /// JSON file holding the entries
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Directory with the front end's static files
    #[arg(long)]
    static_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calorie_tracker=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(cli.config)?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    if let Some(static_dir) = cli.static_dir {
        config.static_dir = static_dir;
    }

    tracing::info!("Data file: {}", config.data_file.display());
    tracing::info!("Static directory: {}", config.static_dir.display());
    if !config.static_dir.is_dir() {
        tracing::warn!(
            "Static directory {} does not exist, only the API will be served",
            config.static_dir.display()
        );
    }

    let entries = init_repository(&config.data_file)?;
    let app = router(AppState::new(entries), &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
