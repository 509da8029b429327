//! API route definitions

use axum::routing::get;
use axum::routing::post;
use axum::Router;

use super::handlers::AppState;
use super::handlers::{
    self,
};

/// Create RESTful API router
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Video endpoints
        .route("/videos/:video_id", get(handlers::get_video_details))
        .route("/videos/:video_id/comments", get(handlers::list_comments))
        .route(
            "/videos/:video_id/comments/fetch",
            post(handlers::fetch_comments),
        )
        .route("/videos/:video_id/summary", get(handlers::get_summary))
        .route(
            "/videos/:video_id/health-report",
            get(handlers::get_health_report),
        )
        .route(
            "/videos/:video_id/analysis",
            get(handlers::get_content_analysis),
        )
        // Creator chat
        .route("/chat", post(handlers::post_chat))
        // Cache administration
        .route(
            "/cache",
            get(handlers::get_cache)
                .post(handlers::put_cache)
                .delete(handlers::delete_cache),
        )
        // Statistics
        .route("/stats", get(handlers::get_stats))
        .with_state(state)
}
