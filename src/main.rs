use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;
use villa_site::{config::Config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("villa_site=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    info!("Site URL: {}", config.site_url);
    info!("Serving pages from {}", config.pages_dir);
    if config.supabase_url.is_none() || config.supabase_anon_key.is_none() {
        info!("Supabase not configured, sitemap lists static pages only");
    }

    let state = server::AppState::new(config)?;
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
