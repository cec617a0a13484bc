use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vehicle_search::catalog::load_catalog;
use vehicle_search::cli::{run_search, Cli, Command};
use vehicle_search::config::Config;
use vehicle_search::routes::build_router;
use vehicle_search::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Initialize structured logging (stderr, so `search` output stays clean)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Search(args) => run_search(&args, &config),
    }
}

async fn serve(config: Config) -> Result<()> {
    info!("Starting vehicle-search v{}", env!("CARGO_PKG_VERSION"));

    // Load listings once at startup; a missing file is an empty catalog
    let catalog = load_catalog(&config.listings_path)?;

    let limits = config.search_limits();
    info!(
        "Search limits: node_limit={:?} time_limit={:?}",
        limits.node_limit, limits.time_limit
    );

    let state = AppState {
        catalog: Arc::new(catalog),
        limits,
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
