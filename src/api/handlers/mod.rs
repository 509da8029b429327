/// API request handlers
use std::sync::Arc;

use axum::Json;

use crate::api::types::ApiResponse;
use crate::api::types::HealthResponse;
use crate::database::Database;
use crate::ingest::IngestService;
use crate::report::ReportService;
use crate::youtube::YouTubeClient;

// Re-export sub-modules
pub mod cache;
pub mod comments;
pub mod reports;
pub mod video;

// Re-export handlers
pub use cache::*;
pub use comments::*;
pub use reports::*;
pub use video::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub database: Arc<Database>,
    pub youtube: Arc<YouTubeClient>,
    pub ingest: Arc<IngestService>,
    pub reports: Arc<ReportService>,
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
