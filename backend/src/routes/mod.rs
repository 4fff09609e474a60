//! Route definitions for the Tranche Monitor

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Browser-facing HTML pages
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::index_page))
        .route("/bonds", get(handlers::bonds_page))
        .route("/bond/:id", get(handlers::bond_page))
        .route("/tranche/:id", get(handlers::tranche_page))
        .route("/account/:id", get(handlers::account_page))
}

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/overview", get(handlers::get_overview))
        .nest("/bonds", bond_routes())
        .nest("/tranches", tranche_routes())
        .route("/accounts/:id", get(handlers::get_account))
        .route("/tokens", get(handlers::list_tokens))
}

fn bond_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_bonds))
        .route("/:id", get(handlers::get_bond))
}

fn tranche_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", get(handlers::get_tranche))
        .route("/:id/holders", get(handlers::get_tranche_holders))
}
