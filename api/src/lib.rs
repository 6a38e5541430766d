//! JSON API of a small social network: accounts, posts, threaded comments
//! and likes.

pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod models;
pub mod routes;
pub mod services;
pub mod states;
pub mod store;

pub use config::Config;
pub use states::AppState;

use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Builds the full application with its middleware stack.
pub fn app(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let max_concurrency = state.config.max_concurrency;

    routes::router()
        .with_state(state)
        .layer(cors)
        .layer(ConcurrencyLimitLayer::new(max_concurrency))
        .layer(TraceLayer::new_for_http())
}
