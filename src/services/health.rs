//! Liveness endpoint
//!
//! Hosting platforms probe this to keep the process alive.

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;
use crate::config::HealthConfig;
use crate::utils::errors::Result;

pub const LIVENESS_BODY: &str = "✅ Bot is running!";

async fn liveness() -> &'static str {
    LIVENESS_BODY
}

pub fn router() -> Router {
    Router::new().route("/", get(liveness))
}

/// Serve the liveness route on an already bound listener
pub async fn serve(listener: TcpListener) -> Result<()> {
    axum::serve(listener, router()).await?;
    Ok(())
}

/// Bind the configured address and serve until the process exits
pub async fn run(config: &HealthConfig) -> Result<()> {
    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, "Liveness endpoint listening");
    serve(listener).await
}
