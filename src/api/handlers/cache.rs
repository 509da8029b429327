/// Cache administration handlers
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;

use super::AppState;
use crate::api::types::ApiResponse;
use crate::api::types::CacheGetResponse;
use crate::api::types::CacheKeyQuery;
use crate::api::types::CachePutRequest;
use crate::api::types::CachePutResponse;

/// Look up a cache entry; expired entries read as a miss
/// (GET /api/cache?key=...)
pub async fn get_cache(
    State(state): State<AppState>,
    Query(query): Query<CacheKeyQuery>,
) -> Result<Json<ApiResponse<CacheGetResponse>>, StatusCode> {
    info!("GET /api/cache?key={}", query.key);

    match state.database.get_cache(&query.key).await {
        Ok(Some(entry)) => Ok(Json(ApiResponse::success(CacheGetResponse {
            found: true,
            data: Some(entry.data),
            expires_at: Some(entry.expires_at),
        }))),
        Ok(None) => Ok(Json(ApiResponse::success(CacheGetResponse {
            found: false,
            data: None,
            expires_at: None,
        }))),
        Err(e) => {
            error!("Cache lookup failed for {}: {}", query.key, e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to get cached data: {e}"
            ))))
        }
    }
}

/// Store a cache entry (POST /api/cache)
pub async fn put_cache(
    State(state): State<AppState>,
    Json(request): Json<CachePutRequest>,
) -> Result<Json<ApiResponse<CachePutResponse>>, StatusCode> {
    info!("POST /api/cache key={}", request.key);

    if request.key.is_empty() {
        return Ok(Json(ApiResponse::error("Missing key")));
    }

    match state
        .database
        .put_cache(&request.key, &request.data, request.expiry_hours)
        .await
    {
        Ok(expires_at) => Ok(Json(ApiResponse::success(CachePutResponse {
            success: true,
            expires_at,
        }))),
        Err(e) => {
            error!("Cache store failed for {}: {}", request.key, e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to cache data: {e}"
            ))))
        }
    }
}

/// Invalidate a cache entry (DELETE /api/cache?key=...)
pub async fn delete_cache(
    State(state): State<AppState>,
    Query(query): Query<CacheKeyQuery>,
) -> Result<Json<ApiResponse<String>>, StatusCode> {
    info!("DELETE /api/cache?key={}", query.key);

    match state.database.delete_cache(&query.key).await {
        Ok(()) => Ok(Json(ApiResponse::success("Cache invalidated".to_string()))),
        Err(e) => {
            error!("Cache invalidation failed for {}: {}", query.key, e);
            Ok(Json(ApiResponse::error(format!(
                "Failed to invalidate cache: {e}"
            ))))
        }
    }
}
