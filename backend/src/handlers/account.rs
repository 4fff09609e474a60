//! Account handlers

use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};

use super::parse_address;
use crate::error::{AppResult, PageResult};
use crate::services::account::{AccountDetail, AccountService};
use crate::views;
use crate::AppState;

/// Account page: every tranche balance the account holds
pub async fn account_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> PageResult<Html<String>> {
    let id = parse_address(&id)?;
    let service = AccountService::new(state.subgraph.clone());
    let detail = service.get_account_detail(&id).await?;
    Ok(Html(views::account_page(&state.config.charts.script_url, &detail)?))
}

/// Get an account's balances
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AccountDetail>> {
    let id = parse_address(&id)?;
    let service = AccountService::new(state.subgraph);
    let detail = service.get_account_detail(&id).await?;
    Ok(Json(detail))
}
