use std::{path::Path, sync::Arc};

use color_eyre::{eyre::Context, Result};
use dotenv::dotenv;
use gauntlet_server::{
    app_state::AppState, config::Config, engine::AuctionEngine, routes::router,
    subscription_manager::SubscriptionManager,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

const CONFIG_PATH: &str = "config.json";

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    // file values first, environment on top
    let config = if Path::new(CONFIG_PATH).exists() {
        Config::from_file(CONFIG_PATH).context("Failed to load config")?
    } else {
        Config::default()
    }
    .with_env_overrides()
    .context("Invalid environment override")?;

    // tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_max_level(config.log_level()?)
        .init();

    let subscription_manager = Arc::new(SubscriptionManager::new(config.broadcast_capacity));
    let engine = Arc::new(AuctionEngine::new(
        config.auction_config(),
        subscription_manager.clone(),
    ));
    let app = router(AppState::new(engine, subscription_manager));

    let server_url = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(server_url).await.context(format!(
        "Failed to bind server to port {}",
        config.server_port
    ))?;

    info!(
        "Auction server running on port {}, bidding window {}ms, exclusivity {}s",
        config.server_port, config.bid_wait_time_ms, config.winner_permission_time
    );
    axum::serve(listener, app).await?;

    Ok(())
}
