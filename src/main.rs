use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use perchance_worker::{api, Config, ImgurClient, PerchanceClient};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration once; handlers only ever see this snapshot
    Config::dotenv_load();
    let config = Config::new();
    config.print_env_vars();
    if !config.imgur_configured() {
        tracing::warn!("IMGUR_CLIENT_ID is not set; every /generate call will fail at upload");
    }

    let generator = PerchanceClient::new(
        config.perchance_api_url.clone(),
        config.perchance_user_key.clone(),
        config.perchance_max_wait_polls,
    );
    let host = ImgurClient::new(config.imgur_api_url.clone(), config.imgur_client_id.clone());

    let state = Arc::new(api::AppState {
        generator: Arc::new(generator),
        host: Arc::new(host),
        imgur_configured: config.imgur_configured(),
    });
    let app = api::router(state);

    let socket_address = config.socket_address();
    tracing::info!("listening on {}", socket_address);
    if let Err(e) = axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await
    {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
