use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::config::Config;
use crate::export_cmd::load_settings;
use crate::routes::build_router;
use crate::state::AppState;

pub async fn run(config: Config) -> Result<()> {
    let settings = load_settings(config.export_settings.as_deref())?;
    let port = config.port;

    let app = build_router(AppState::new(config, settings))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
