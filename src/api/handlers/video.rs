/// Video metadata and stats handlers
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;

use super::AppState;
use crate::api::types::ApiResponse;
use crate::database::CommentStats;
use crate::models::VideoDetails;
use crate::TubePulseError;

/// Get video details (GET /api/videos/:video_id)
pub async fn get_video_details(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<ApiResponse<VideoDetails>>, StatusCode> {
    info!("GET /api/videos/{}", video_id);

    match state.youtube.video_details(&video_id).await {
        Ok(details) => Ok(Json(ApiResponse::success(details))),
        Err(TubePulseError::VideoNotFound(id)) => {
            Ok(Json(ApiResponse::error(format!("Video not found: {id}"))))
        }
        Err(e) => {
            error!("Failed to fetch video details for {}: {}", video_id, e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to fetch video details: {e}"
            ))))
        }
    }
}

/// Get stored-comment stats (GET /api/stats)
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<CommentStats>>, StatusCode> {
    info!("GET /api/stats");

    match state.database.comment_stats().await {
        Ok(stats) => Ok(Json(ApiResponse::success(stats))),
        Err(e) => {
            error!("Failed to compute stats: {}", e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to compute stats: {e}"
            ))))
        }
    }
}
