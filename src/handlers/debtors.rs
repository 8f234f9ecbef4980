// src/handlers/debtors.rs
use log::{info, warn};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::services::dashboard::DashboardState;

/// Sorted debtor list. An unavailable dataset is still a 200 with `available: false`.
pub async fn get_debtors(state: Arc<DashboardState>) -> Result<Json, Rejection> {
    info!("Handling request for the debtor list");
    let summary = state.snapshot.debtors.summary();
    if let Some(reason) = &summary.reason {
        warn!("Serving debtor section as unavailable: {}", reason);
    }
    Ok(warp::reply::json(&summary))
}
