mod routes;
mod state;

use anyhow::Result;
use hivecal_core::config::HivecalConfig;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("HIVECAL_LOG").unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = HivecalConfig::load()?;
    // Fail at startup rather than on the first request
    config.tz()?;

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let app = routes::app(AppState::new(config));

    info!("hivecal-server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
