use anyhow::{anyhow, Context, Result};
use gmail_sender::api::{create_app_router, AppState};
use gmail_sender::config::{load_config, AppConfig};
use gmail_sender::provider::GoogleClient;
use gmail_sender::session::SessionStore;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gmail_sender=info,tower_http=info".into()),
        )
        .init();

    info!("Gmail sender starting...");

    // File config (optional), then environment overrides
    let mut config = match std::env::var("GMAIL_SENDER_CONFIG") {
        Ok(path) => load_config(&path)
            .map_err(|e| anyhow!("Failed to load config file {}: {}", path, e))?,
        Err(_) => AppConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());

    if config.google.client_id.is_none() || config.google.client_secret.is_none() {
        warn!("GOOGLE_CLIENT_ID / GOOGLE_CLIENT_SECRET not set; OAuth endpoints will fail until configured");
    }

    let sessions = SessionStore::from_config(&config.session, config.server.production)?;

    info!(
        bind_addr = %config.server.bind_addr,
        production = config.server.production,
        redirect_uri = %config.google.redirect_uri,
        sealed_cookies = sessions.is_sealed(),
        "Configuration loaded"
    );

    let state = AppState {
        provider: Arc::new(GoogleClient::new(config.google.clone())),
        sessions,
    };
    let router = create_app_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    info!(addr = %config.server.bind_addr, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Gmail sender stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl_c signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
