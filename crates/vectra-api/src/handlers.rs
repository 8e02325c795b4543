//! Route handlers for the `/api/v1/vectors` and `/api/v1/health` endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use vectra_core::types::{
    ComponentHealth, ContentType, HealthReport, HealthStatus, SampleLoadSummary, SearchQuery,
    SearchResponse, StoreRequest, StoreResult,
};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub content: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
}

/// Metadata for an image or video that has already been placed under `/media`.
#[derive(Debug, Deserialize)]
pub struct MediaRequest {
    pub filename: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub query: Option<String>,
    pub preferred_type: Option<String>,
    pub include_media: Option<bool>,
    pub limit: Option<i64>,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub components: Vec<String>,
}

// =============================================================================
// Store
// =============================================================================

fn store_response(result: StoreResult) -> Response {
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, Json(result)).into_response()
}

fn require_content(content: Option<&str>) -> Result<(), ApiError> {
    match content {
        Some(c) if !c.trim().is_empty() => Ok(()),
        _ => Err(ApiError::BadRequest("Content is required".to_string())),
    }
}

/// POST /api/v1/vectors/embed
pub async fn embed(
    State(state): State<AppState>,
    Json(request): Json<StoreRequest>,
) -> Result<Response, ApiError> {
    require_content(Some(&request.content))?;
    Ok(store_response(state.pipeline.store_document(request).await))
}

/// POST /api/v1/vectors/text
pub async fn embed_text(
    State(state): State<AppState>,
    Json(body): Json<TextRequest>,
) -> Result<Response, ApiError> {
    require_content(body.content.as_deref())?;

    let request = StoreRequest {
        content: body.content.unwrap_or_default(),
        content_type: Some(ContentType::Text),
        category: Some(body.category.unwrap_or_else(|| "general".to_string())),
        description: Some(body.description.unwrap_or_default()),
        media_url: None,
    };
    Ok(store_response(state.pipeline.store_document(request).await))
}

/// POST /api/v1/vectors/image
pub async fn embed_image(
    State(state): State<AppState>,
    Json(body): Json<MediaRequest>,
) -> Result<Response, ApiError> {
    let request = media_request(body, ContentType::Image)?;
    Ok(store_response(state.pipeline.store_document(request).await))
}

/// POST /api/v1/vectors/video
pub async fn embed_video(
    State(state): State<AppState>,
    Json(body): Json<MediaRequest>,
) -> Result<Response, ApiError> {
    let request = media_request(body, ContentType::Video)?;
    Ok(store_response(state.pipeline.store_document(request).await))
}

/// Media is embedded by its description, or by its filename when there is none.
fn media_request(body: MediaRequest, content_type: ContentType) -> Result<StoreRequest, ApiError> {
    let filename = body.filename.trim();
    if filename.is_empty() {
        return Err(ApiError::BadRequest("Filename is required".to_string()));
    }
    let (folder, default_category) = match content_type {
        ContentType::Video => ("videos", "videos"),
        _ => ("images", "images"),
    };
    info!(filename = %filename, content_type = %content_type, "Received media metadata");

    let description = body.description.filter(|d| !d.trim().is_empty());
    Ok(StoreRequest {
        content: description.clone().unwrap_or_else(|| filename.to_string()),
        content_type: Some(content_type),
        category: Some(body.category.unwrap_or_else(|| default_category.to_string())),
        description,
        media_url: Some(format!("/media/{}/{}", folder, filename)),
    })
}

// =============================================================================
// Search
// =============================================================================

/// GET /api/v1/vectors/search
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Query is required".to_string()))?;

    let preferred_type = params
        .preferred_type
        .filter(|t| !t.is_empty())
        .map(|t| t.parse::<ContentType>())
        .transpose()?;

    let request = SearchQuery {
        query,
        preferred_type,
        include_media: params.include_media.unwrap_or(false),
        limit: params.limit,
    };
    Ok(Json(state.pipeline.search(&request).await))
}

/// POST /api/v1/vectors/search
pub async fn search_post(
    State(state): State<AppState>,
    Json(request): Json<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    if request.query.trim().is_empty() {
        return Err(ApiError::BadRequest("Query is required".to_string()));
    }
    Ok(Json(state.pipeline.search(&request).await))
}

// =============================================================================
// Delete / samples
// =============================================================================

/// DELETE /api/v1/vectors/{id}
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    if state.pipeline.delete(&id).await {
        Ok(Json(DeleteResponse { id, deleted: true }))
    } else {
        Err(ApiError::Internal(format!("Failed to delete document {}", id)))
    }
}

/// POST /api/v1/vectors/load-samples
pub async fn load_samples(State(state): State<AppState>) -> Json<SampleLoadSummary> {
    info!("Loading sample data");
    Json(state.pipeline.load_samples().await)
}

// =============================================================================
// Health
// =============================================================================

fn status_code(status: HealthStatus) -> StatusCode {
    if status.is_up() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /api/v1/health
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.health.report().await;
    (status_code(report.status), Json(report))
}

/// GET /api/v1/health/live
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: HealthStatus::Up,
        timestamp: Utc::now(),
    })
}

/// GET /api/v1/health/ready
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let report = state.health.report().await;
    let body = ReadinessResponse {
        status: report.status,
        timestamp: report.timestamp,
        components: report.components.keys().cloned().collect(),
    };
    (status_code(report.status), Json(body))
}

/// GET /api/v1/health/db
pub async fn engine_health(State(state): State<AppState>) -> (StatusCode, Json<ComponentHealth>) {
    let component = state.health.engine().await;
    (status_code(component.status), Json(component))
}
