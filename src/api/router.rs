use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, members};
use crate::api::state::AppState;

/// Builds the HTTP router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .route("/v1/member", get(members::search_members_v1))
        .route("/v2/members", get(members::search_members_v2))
        .route("/v3/members", get(members::search_members_v3))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
