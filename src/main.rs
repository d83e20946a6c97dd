use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use commentpulse_backend::external::upstream::UpstreamAnalytics;
use commentpulse_backend::external::webhook::WebhookClient;
use commentpulse_backend::logging::{init_logging, LoggingConfig};
use commentpulse_backend::services::session_service::SessionStore;
use commentpulse_backend::state::AppState;
use commentpulse_backend::app;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_logging(LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let analytics = UpstreamAnalytics::from_env()
        .map_err(|e| anyhow::anyhow!("analytics provider: {}", e))?;
    let variants =
        WebhookClient::from_env().map_err(|e| anyhow::anyhow!("variant provider: {}", e))?;

    let state = AppState {
        analytics: Arc::new(analytics),
        variants: Arc::new(variants),
        sessions: SessionStore::new(),
    };
    let app = app::create_app(state);

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .context("PORT must be a valid port number")?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("commentpulse backend running at http://{}/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
