//! Tranche handlers

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};

use super::parse_address;
use crate::error::{AppResult, PageResult};
use crate::services::tranche::{Holder, TrancheDetail, TrancheService};
use crate::views;
use crate::AppState;

/// Tranche info and its holder chart
pub async fn tranche_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PageResult<Html<String>> {
    let id = parse_address(&id)?;
    let service = TrancheService::new(state.subgraph.clone());
    let detail = service.get_tranche_detail(&id).await?;
    Ok(Html(views::tranche_page(&state.config.charts.script_url, &detail)?))
}

/// Get a tranche with its token and holders
pub async fn get_tranche(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TrancheDetail>> {
    let id = parse_address(&id)?;
    let service = TrancheService::new(state.subgraph);
    let detail = service.get_tranche_detail(&id).await?;
    Ok(Json(detail))
}

/// Holders of a tranche, largest balance first
pub async fn get_tranche_holders(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Holder>>> {
    let id = parse_address(&id)?;
    let service = TrancheService::new(state.subgraph);
    let detail = service.get_tranche_detail(&id).await?;
    Ok(Json(detail.holders))
}
