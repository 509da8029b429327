/// Summary, health-report, analysis and chat handlers
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;

use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::SummaryResponse;
use crate::report::ChatAnswer;
use crate::report::ChatContext;
use crate::report::ContentAnalysis;
use crate::report::HealthReport;

/// Aggregate summary of a video's stored comments
/// (GET /api/videos/:video_id/summary)
pub async fn get_summary(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<ApiResponse<SummaryResponse>>, StatusCode> {
    info!("GET /api/videos/{}/summary", video_id);

    match state.reports.summary(&video_id).await {
        Ok(summary) => {
            let sentiment = summary.sentiment_distribution.percentages();
            Ok(Json(ApiResponse::success(SummaryResponse {
                video_id,
                summary,
                sentiment,
            })))
        }
        Err(e) => {
            error!("Failed to build summary for {}: {}", video_id, e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to generate summary: {e}"
            ))))
        }
    }
}

/// Creator wellbeing report (GET /api/videos/:video_id/health-report)
pub async fn get_health_report(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<ApiResponse<HealthReport>>, StatusCode> {
    info!("GET /api/videos/{}/health-report", video_id);

    match state.reports.health_report(&video_id).await {
        Ok(report) => Ok(Json(ApiResponse::success(report))),
        Err(e) => {
            error!("Failed to build health report for {}: {}", video_id, e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to analyze creator health: {e}"
            ))))
        }
    }
}

/// LLM content analysis (GET /api/videos/:video_id/analysis)
pub async fn get_content_analysis(
    State(state): State<AppState>,
    Path(video_id): Path<String>,
) -> Result<Json<ApiResponse<ContentAnalysis>>, StatusCode> {
    info!("GET /api/videos/{}/analysis", video_id);

    match state.reports.content_analysis(&video_id).await {
        Ok(analysis) => Ok(Json(ApiResponse::success(analysis))),
        Err(e) => {
            error!("Failed to generate analysis for {}: {}", video_id, e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to generate analysis: {e}"
            ))))
        }
    }
}

/// Creator chat over provided context (POST /api/chat)
pub async fn post_chat(
    State(state): State<AppState>,
    Json(context): Json<ChatContext>,
) -> Result<Json<ApiResponse<ChatAnswer>>, StatusCode> {
    info!("POST /api/chat");

    match state.reports.chat(&context).await {
        Ok(answer) => Ok(Json(ApiResponse::success(answer))),
        Err(e) => {
            error!("Chat completion failed: {}", e);
            Ok(Json(ApiResponse::error(format!("Chat failed: {e}"))))
        }
    }
}
