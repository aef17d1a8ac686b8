use quiz_backend::{
    config::{get_config, init_config},
    routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    if config.google_api_key.is_empty() {
        tracing::warn!("GOOGLE_API_KEY is not set; quiz generation will fail until it is");
    }

    let app_state = AppState::from_config(config)?;
    info!(model = %config.gemini_model, "Using Gemini model");
    info!("Serving static files from: {}", config.static_dir);

    let app = routes::router(app_state, &config.static_dir);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server running at http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
