//! Landing page handlers

use axum::{extract::State, response::Html, Json};

use crate::error::{AppResult, PageResult};
use crate::services::dashboard::{DashboardOverview, DashboardService};
use crate::views;
use crate::AppState;

/// Landing page with demo links and the account and token charts
pub async fn index_page(State(state): State<AppState>) -> PageResult<Html<String>> {
    let service = DashboardService::new(state.subgraph.clone());
    let overview = service
        .get_overview(state.config.dashboard.top_tokens)
        .await?;
    let html = views::index_page(
        &state.config.dashboard,
        &state.config.charts.script_url,
        &overview,
    )?;
    Ok(Html(html))
}

/// Landing page data as JSON
pub async fn get_overview(State(state): State<AppState>) -> AppResult<Json<DashboardOverview>> {
    let service = DashboardService::new(state.subgraph.clone());
    let overview = service
        .get_overview(state.config.dashboard.top_tokens)
        .await?;
    Ok(Json(overview))
}
