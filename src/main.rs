use anyhow::Context;
use clap::Parser;
use tracing::info;

use hexsat_config::AppConfig;
use hexsat_observability::init_tracing;
use hexsatisfaction::{AppState, init_router};

#[derive(Parser, Debug)]
#[command(name = "hexsatisfaction")]
#[command(about = "User and author REST API", long_about = None)]
struct Args {
    /// Use the in-memory store even when DATABASE_URL is set
    #[arg(long)]
    in_memory: bool,

    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing();

    let state = AppState::from_config(&config, args.in_memory).await?;
    let app = init_router(state).context("Failed to build route table")?;

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(%address, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
