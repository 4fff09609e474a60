//! Token listing handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{OrderDirection, Token};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::external::ListQuery;
use crate::services::token::TokenService;
use crate::AppState;

/// Query parameters for listing tokens
#[derive(Debug, Deserialize, Validate)]
pub struct ListTokensQuery {
    #[validate(range(min = 1, max = 1000))]
    pub first: Option<u32>,
    pub order_by: Option<String>,
    pub direction: Option<OrderDirection>,
}

impl ListTokensQuery {
    fn to_list_query(&self) -> ListQuery {
        let mut query = ListQuery::new();
        if let Some(first) = self.first {
            query = query.first(first);
        }
        if let Some(order_by) = &self.order_by {
            query = query.order_by(order_by.as_str(), self.direction.unwrap_or_default());
        }
        query
    }
}

/// List tokens
pub async fn list_tokens(
    State(state): State<AppState>,
    params: Result<Query<ListTokensQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Token>>> {
    let Query(params) = params.map_err(|e| AppError::ValidationError(e.body_text()))?;
    params.validate()?;

    let service = TokenService::new(state.subgraph);
    let tokens = service.list_tokens(&params.to_list_query()).await?;
    Ok(Json(tokens))
}
