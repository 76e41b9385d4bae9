//! HTTP gateway for Groundwork.
//!
//! Routes, handlers, shared state and the error envelope. This is the
//! only layer that classifies failures into user-facing categories.

pub mod error;
pub mod rest;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(rest::health::health_check))
        .route("/users/:id", get(rest::users::get_user))
        .route("/users", post(rest::users::create_user))
        .with_state(state)
        .layer(cors)
}
