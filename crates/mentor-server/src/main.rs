use anyhow::Result;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use mentor::orchestrator::Orchestrator;
use mentor::providers::gemini::GeminiProvider;

mod configuration;
mod error;
mod routes;
mod state;

use configuration::Settings;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let settings = Settings::new()?;
    info!(
        "Rate limit configured at {} requests per {}s window",
        settings.rate_limit.max_requests, settings.rate_limit.window_secs
    );

    let addr = settings.server.socket_addr();
    let provider = GeminiProvider::new(settings.provider.into_config())?;
    let orchestrator = Orchestrator::new(Arc::new(provider));
    let state = AppState::new(orchestrator);

    // Frontends are served from other origins during development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::configure(state).layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
