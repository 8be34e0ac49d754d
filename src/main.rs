use std::sync::Arc;
use tokio::net::TcpListener;
use music_discovery_server::{
    config::Config,
    api::routes::create_router,
    probe::HttpFetcher,
    telemetry,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first so .env can set RUST_LOG
    let config = Config::load()?;
    telemetry::init_telemetry();

    let server_addr = config.server_addr;
    tracing::info!("Probe target: {} (timeout {:?})", config.probe.target_url, config.probe.timeout);

    let app_state = AppState {
        config: Arc::new(config),
        fetcher: Arc::new(HttpFetcher::new()?),
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    tracing::info!("Music discovery server listening on http://{}", server_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
