//! Koha bridge server: loads settings from the environment (and `.env`) and serves the bridge API.
//!
//! Run from repo root: `cargo run -p koha-bridge-server`

use koha_bridge::{app_routes, log_level_directive, AppState, Settings};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let fallback = log_level_directive(&std::env::var("LOG_LEVEL").unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "settings loaded");
    let addr = settings.bind_addr();
    let app = app_routes(AppState::new(settings));

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("koha bridge listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
