// src/handlers/dashboard.rs
use log::{debug, error, info};
use serde::Deserialize;
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use super::error::ApiError;
use crate::services::dashboard::{build_view, DashboardState};
use crate::services::metrics::current_and_previous;
use crate::services::presenter::{render_frame, Layout};
use serde_json::json;

fn render(state: &DashboardState, requested: Option<usize>) -> Result<Json, Rejection> {
    let view = build_view(&state.snapshot, &state.config, requested).map_err(|e| {
        error!("Rejected selection {:?}: {}", requested, e);
        warp::reject::custom(ApiError::from(e))
    })?;
    let frame = render_frame(&view, Layout::standard())
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?;
    Ok(warp::reply::json(&frame))
}

pub async fn get_dashboard(state: Arc<DashboardState>) -> Result<Json, Rejection> {
    info!("Handling request for the latest month");
    render(&state, None)
}

pub async fn get_dashboard_at(index: usize, state: Arc<DashboardState>) -> Result<Json, Rejection> {
    info!("Handling request for month index {}", index);
    render(&state, Some(index))
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub label: String,
}

/// Selection by label, e.g. `?label=Ene%202024`. The query string arrives decoded.
pub async fn get_dashboard_for_month(query: MonthQuery, state: Arc<DashboardState>) -> Result<Json, Rejection> {
    info!("Handling request for month '{}'", query.label);
    let index = state.snapshot.store.resolve_month(&query.label).map_err(|e| {
        error!("{}", e);
        warp::reject::custom(ApiError::from(e))
    })?;
    render(&state, Some(index))
}

pub async fn get_months(state: Arc<DashboardState>) -> Result<Json, Rejection> {
    let months = state.snapshot.store.month_options();
    debug!("Returning {} month options", months.len());
    Ok(warp::reply::json(&months))
}

/// Full-precision KPIs for one month, without presentation formatting.
pub async fn get_kpis(index: usize, state: Arc<DashboardState>) -> Result<Json, Rejection> {
    let store = &state.snapshot.store;
    let index = store
        .check(index)
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?;

    let kpis = current_and_previous(store, index);
    Ok(warp::reply::json(&json!({
        "current": kpis.current,
        "previous": kpis.previous,
        "delta": kpis.delta(),
    })))
}
