use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/catalog", get(handlers::catalog_summary))
        // Recommendations
        .route("/recommendations", post(handlers::recommend))
        .route("/recommendations/revise", post(handlers::revise))
        // Movies and feedback
        .route("/movies/*title", get(handlers::movie_details))
        .route("/feedback", post(handlers::submit_feedback))
        .route("/feedback/*title", get(handlers::get_feedback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
