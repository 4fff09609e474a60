//! Bond handlers

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};

use super::parse_address;
use crate::error::{AppResult, PageResult};
use crate::services::bond::{BondDetail, BondService, BondSummary};
use crate::views;
use crate::AppState;

/// Every bond, active ones first
pub async fn bonds_page(State(state): State<AppState>) -> PageResult<Html<String>> {
    let service = BondService::new(state.subgraph.clone());
    let bonds = service.list_bonds().await?;
    Ok(Html(views::bonds_page(&state.config.charts.script_url, &bonds)?))
}

/// One bond with a holder chart per tranche
pub async fn bond_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PageResult<Html<String>> {
    let id = parse_address(&id)?;
    let service = BondService::new(state.subgraph.clone());
    let detail = service.get_bond_detail(&id).await?;
    Ok(Html(views::bond_page(&state.config.charts.script_url, &detail)?))
}

/// List bonds
pub async fn list_bonds(State(state): State<AppState>) -> AppResult<Json<Vec<BondSummary>>> {
    let service = BondService::new(state.subgraph);
    let bonds = service.list_bonds().await?;
    Ok(Json(bonds))
}

/// Get a bond with its tranche holders
pub async fn get_bond(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BondDetail>> {
    let id = parse_address(&id)?;
    let service = BondService::new(state.subgraph);
    let detail = service.get_bond_detail(&id).await?;
    Ok(Json(detail))
}
