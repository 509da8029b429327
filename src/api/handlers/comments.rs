/// Comment listing and ingestion handlers
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;

use super::AppState;
use crate::api::types::ApiResponse;
use crate::ingest::IngestOutcome;
use crate::models::Comment;

/// List stored comments for a video (GET /api/videos/:video_id/comments)
pub async fn list_comments(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<Comment>>>, StatusCode> {
    info!("GET /api/videos/{}/comments", video_id);

    match state.database.find_comments(&video_id).await {
        Ok(comments) => Ok(Json(ApiResponse::success(comments))),
        Err(e) => {
            error!("Failed to list comments for {}: {}", video_id, e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to list comments: {e}"
            ))))
        }
    }
}

/// Fetch, label and store fresh comments for a video
/// (POST /api/videos/:video_id/comments/fetch)
pub async fn fetch_comments(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<ApiResponse<IngestOutcome>>, StatusCode> {
    info!("POST /api/videos/{}/comments/fetch", video_id);

    match state.ingest.refresh_comments(&video_id).await {
        Ok(outcome) => {
            info!(
                "✅ Stored {} comments for video {}",
                outcome.stored, outcome.video_id
            );
            Ok(Json(ApiResponse::success(outcome)))
        }
        Err(e) => {
            error!("Failed to refresh comments for {}: {}", video_id, e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to fetch and process comments: {e}"
            ))))
        }
    }
}
