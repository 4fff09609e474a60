//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub subgraph: String,
    pub indexed_block: Option<u64>,
    pub has_indexing_errors: Option<bool>,
}

/// Health check endpoint handler
///
/// Always answers 200; an unreachable subgraph reports `degraded`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let response = match state.subgraph.indexing_status().await {
        Ok(status) => HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            subgraph: "connected".to_string(),
            indexed_block: Some(status.block_number),
            has_indexing_errors: Some(status.has_indexing_errors),
        },
        Err(e) => {
            tracing::warn!("Subgraph health probe failed: {}", e);
            HealthResponse {
                status: "degraded".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                subgraph: "unreachable".to_string(),
                indexed_block: None,
                has_indexing_errors: None,
            }
        }
    };

    Json(response)
}
