use clap::Parser;
use sarthi_backend::HttpBackend;
use sarthi_core::config::SarthiConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod app;
mod cli;
mod http;
mod terminal;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Serve);

    // The terminal chat shares stdout with the conversation, so keep it quiet.
    let default_filter = match command {
        Commands::Serve => "sarthi_gateway=info,sarthi_backend=info,tower_http=debug",
        Commands::Chat { .. } => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // load config: --config > SARTHI_CONFIG env > ~/.sarthi/sarthi.toml
    let config_path = cli.config.or_else(|| std::env::var("SARTHI_CONFIG").ok());
    let config = SarthiConfig::load(config_path.as_deref()).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        SarthiConfig::default()
    });

    match command {
        Commands::Serve => serve(config).await,
        Commands::Chat { direct } => terminal::run(config, direct).await,
    }
}

async fn serve(config: SarthiConfig) -> anyhow::Result<()> {
    let backend = HttpBackend::new(config.upstream.url.clone(), config.upstream.timeout())?;
    info!(
        upstream = %backend.url(),
        timeout_secs = ?config.upstream.timeout_secs,
        "forwarding queries to backend"
    );

    let addr: SocketAddr = format!("{}:{}", config.gateway.bind, config.gateway.port).parse()?;
    let state = Arc::new(app::AppState::new(config, Arc::new(backend)));
    let router = app::build_router(state);

    info!("Sarthi gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Sarthi gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
