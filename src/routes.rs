// src/routes.rs
use log::info;
use std::convert::Infallible;
use std::sync::Arc;
use warp::reject::Rejection;
use warp::{Filter, Reply};

use crate::handlers::dashboard::{
    get_dashboard, get_dashboard_at, get_dashboard_for_month, get_kpis, get_months, MonthQuery,
};
use crate::handlers::debtors::get_debtors;
use crate::handlers::error::ApiError;
use crate::services::dashboard::DashboardState;

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let code;
    let message;

    if err.is_not_found() {
        code = warp::http::StatusCode::NOT_FOUND;
        message = "Not Found".to_string();
    } else if let Some(api_error) = err.find::<ApiError>() {
        code = api_error.status;
        message = api_error.message.clone();
    } else if err.find::<warp::reject::InvalidQuery>().is_some() {
        code = warp::http::StatusCode::BAD_REQUEST;
        message = "Invalid query string".to_string();
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        code = warp::http::StatusCode::METHOD_NOT_ALLOWED;
        message = "Method Not Allowed".to_string();
    } else {
        code = warp::http::StatusCode::INTERNAL_SERVER_ERROR;
        message = "Internal Server Error".to_string();
    }

    Ok(warp::reply::with_status(
        warp::reply::json(&serde_json::json!({
            "error": message,
        })),
        code,
    ))
}

pub fn routes(state: Arc<DashboardState>) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    info!("Configuring routes...");

    let state_filter = warp::any().map(move || state.clone());

    let months_route = warp::path!("api" / "v1" / "months")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_months);

    let dashboard_route = warp::path!("api" / "v1" / "dashboard")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_dashboard);

    let dashboard_at_route = warp::path!("api" / "v1" / "dashboard" / usize)
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_dashboard_at);

    let dashboard_month_route = warp::path!("api" / "v1" / "dashboard" / "month")
        .and(warp::get())
        .and(warp::query::<MonthQuery>())
        .and(state_filter.clone())
        .and_then(get_dashboard_for_month);

    let kpis_route = warp::path!("api" / "v1" / "kpis" / usize)
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_kpis);

    let debtors_route = warp::path!("api" / "v1" / "debtors")
        .and(warp::get())
        .and(state_filter.clone())
        .and_then(get_debtors);

    info!("All routes configured successfully.");

    months_route
        .or(dashboard_route)
        .or(dashboard_at_route)
        .or(dashboard_month_route)
        .or(kpis_route)
        .or(debtors_route)
        .recover(handle_rejection)
}
