//! IOTA DeFi tool server
//!
//! Axum server exposing the DeFi agent tools over JSON.

mod app;
mod handlers;
mod state;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use iota_defi::{DefiConfig, MarketSnapshot};

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = DefiConfig::from_env();
    tracing::info!(node = %config.node_url, explorer = %config.explorer_url, "IOTA network config");

    let snapshot = MarketSnapshot::demo();
    tracing::info!(
        assets = snapshot.assets.len(),
        pools = snapshot.lending_pools.len(),
        portfolios = snapshot.portfolios.len(),
        "Loaded demo market snapshot"
    );

    let state = AppState::new(snapshot, config);

    tracing::info!("Registered {} tools:", state.tools.len());
    for name in state.tools.names() {
        tracing::info!("  • {}", name);
    }

    let app = app::router(state);

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("defi-server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /api/tools         - Tool schemas");
    tracing::info!("  GET  /api/tools/prompt  - Tool section for a system prompt");
    tracing::info!("  POST /api/tools/{{name}}  - Call a tool");

    axum::serve(listener, app).await?;

    Ok(())
}
