use anyhow::Result;
use dotenv::dotenv;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::Filter;

use community_dashboard::config::AppConfig;
use community_dashboard::routes;
use community_dashboard::services::dashboard::DashboardState;
use community_dashboard::services::loader::{http_client, load_snapshot};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();
    info!("Logger initialized. Starting the dashboard...");

    let config = AppConfig::from_env()?;
    info!("Using PORT: {}", config.port);

    let client = http_client()?;
    let snapshot = load_snapshot(&client, &config.records, &config.debtors).await?;
    info!(
        "Snapshot ready: {} months, default selection {:?}",
        snapshot.store.len(),
        snapshot.store.default_index()
    );

    let state = Arc::new(DashboardState {
        snapshot,
        config: config.dashboard,
    });

    // Bind to 0.0.0.0 so the front end can reach us from another host
    let addr: SocketAddr = ([0, 0, 0, 0], config.port).into();
    info!("Will bind to: {}", addr);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("content-type")
        .allow_methods(vec!["GET"]);

    let api = routes::routes(state).with(cors);
    info!("Routes configured successfully with CORS.");

    info!("Starting server on {}", addr);
    warp::serve(api).run(addr).await;
    Ok(())
}
