//! Media gateway server.
//!
//! Reads configuration from the environment (and `.env`), serves the tool
//! endpoints until Ctrl-C, then closes the provider client and blob store.

use std::sync::Arc;

use siumai_media_gateway::config::Settings;
use siumai_media_gateway::observability::{self, mask_token};
use siumai_media_gateway::server;
use siumai_media_gateway::service::MediaService;

use secrecy::ExposeSecret;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // settings first so `.env` can carry the log level
    let settings = Settings::from_env()?;
    observability::init_from_env()?;

    tracing::info!(
        name = %settings.server.name,
        provider = settings.provider.provider_id(),
        api_key = %mask_token(Some(settings.server.api_key.expose_secret())),
        storage = settings.storage.is_some(),
        "Starting media gateway"
    );
    if !settings.server.required_scopes.is_empty() {
        tracing::info!(scopes = ?settings.server.required_scopes, "Required scopes configured");
    }

    let service = Arc::new(MediaService::new(
        settings.provider.clone(),
        settings.storage.clone(),
    )?);
    let app = server::router(Arc::clone(&service), &settings.server);

    let address = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        base_url = settings.server.base_url.as_deref().unwrap_or(""),
        "Listening"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    tracing::info!("Server stopped; releasing provider and storage clients");
    let closed = service.close().await;
    served?;
    closed?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
}
