// src/bin/render_month.rs
use anyhow::Result;
use community_dashboard::config::AppConfig;
use community_dashboard::services::dashboard::build_view;
use community_dashboard::services::loader::{http_client, load_snapshot};
use community_dashboard::services::presenter::{render_frame, Layout};
use dotenv::dotenv;
use log::info;
use std::env;

// Usage: render_month [index|YYYY-MM]
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;
    let client = http_client()?;
    let snapshot = load_snapshot(&client, &config.records, &config.debtors).await?;

    let requested = match env::args().nth(1) {
        None => None,
        Some(arg) => match arg.parse::<usize>() {
            Ok(index) => Some(index),
            Err(_) => Some(snapshot.store.resolve_month(&arg)?),
        },
    };
    info!("Rendering selection {:?} of {} months", requested, snapshot.store.len());

    let view = build_view(&snapshot, &config.dashboard, requested)?;
    let frame = render_frame(&view, Layout::standard())?;
    println!("{}", serde_json::to_string_pretty(&frame)?);
    Ok(())
}
