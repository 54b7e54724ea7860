//! Auxiliary HTTP health listener.

use axum::{routing::get, Router};
use kasbot_common::Result;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Serve `GET /healthz` on the given port until the process exits.
pub async fn serve(port: u16) -> Result<()> {
    let app = Router::new()
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "health listener started");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_healthz_body() {
        assert_eq!(healthz().await, "ok");
    }
}
