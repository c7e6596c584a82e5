use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use org_chart_api::config;

#[derive(Parser, Debug)]
#[command(name = "org-chart-api")]
#[command(about = "Org chart API - employees, departments and reporting hierarchy")]
#[command(version)]
struct Args {
    #[arg(long, help = "Address to bind (overrides ORG_CHART_HOST)")]
    host: Option<String>,

    #[arg(long, short, help = "Port to listen on (overrides ORG_CHART_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "YAML fixture with departments and employees to seed")]
    fixture: Option<String>,

    #[arg(long, help = "Use the in-memory store even if DATABASE_URL is set")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = config::config().clone();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(fixture) = args.fixture {
        config.organisation.fixture = Some(fixture);
    }
    if args.memory {
        config.store.backend = config::StoreBackend::Memory;
    }
    tracing::info!(
        "Starting Org Chart API in {:?} mode with {:?} store",
        config.environment,
        config.store.backend
    );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = org_chart_api::AppState::bootstrap(config).await?;
    let app = org_chart_api::app(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Org Chart API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
