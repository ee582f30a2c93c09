use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::request_id::{make_request_span, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        // Wraps the trace layer so the id exists before the span is built
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/catalog", get(handlers::get_catalog))
        .route("/catalog/:item_id", get(handlers::get_catalog_item))
        // Stateless scoring
        .route("/recommendations", post(handlers::recommend))
        // Stored profiles
        .route(
            "/profiles/:profile_id/preferences",
            get(handlers::get_preferences).put(handlers::put_preferences),
        )
        .route(
            "/profiles/:profile_id/history",
            get(handlers::get_history).post(handlers::append_history),
        )
        .route(
            "/profiles/:profile_id/recommendations",
            get(handlers::profile_recommendations),
        )
}
