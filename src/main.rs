use std::net::{IpAddr, SocketAddr};

use tracing_subscriber::EnvFilter;

use capitalcare::{config, routes, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = config::load();

    if settings.gemini_api_key.trim().is_empty() {
        tracing::warn!("GEMINI_API_KEY not set; AI endpoints will serve fallbacks or fail");
    }
    if settings.has_default_jwt_secret() {
        tracing::warn!("JWT_SECRET not set; using the insecure development default");
    }

    let host: IpAddr = settings.host.parse()?;
    let addr = SocketAddr::from((host, settings.port));

    let state = AppState::from_settings(settings).await?;
    let app = routes::app(state);

    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
