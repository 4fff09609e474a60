//! Tranche Monitor - read-only dashboard over the tranche subgraph
//!
//! Renders bonds, tranches, holders and accounts indexed by The Graph as
//! HTML pages with charts, and exposes the same views as a JSON API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod views;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use external::SubgraphClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub subgraph: SubgraphClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let subgraph = SubgraphClient::new(&config.subgraph)?;
        Ok(Self {
            subgraph,
            config: Arc::new(config),
        })
    }
}

/// Initialize tracing; `RUST_LOG` overrides the default filter
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tranche_monitor=debug,tower_http=debug".into());

    if config.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::page_routes())
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
