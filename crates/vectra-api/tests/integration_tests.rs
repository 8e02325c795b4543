//! End-to-end tests for the HTTP API over an in-memory document store.
//!
//! Each test builds its own router and store, so tests are independent.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use vectra_api::create_router;
use vectra_api::handlers::{DeleteResponse, ReadinessResponse};
use vectra_api::state::AppState;
use vectra_core::config::VectraConfig;
use vectra_core::types::{
    ComponentHealth, ContentType, HealthReport, HealthStatus, SampleLoadSummary, SearchResponse,
    StoreResult,
};
use vectra_engine::MemoryStore;
use vectra_vector::DeterministicEmbedder;

// =============================================================================
// Helpers
// =============================================================================

fn make_state() -> (AppState, MemoryStore) {
    let config = VectraConfig::default();
    let store = MemoryStore::new();
    let state = AppState::new(
        config.clone(),
        Arc::new(DeterministicEmbedder::new(&config.embedding)),
        Arc::new(store.clone()),
    );
    (state, store)
}

fn make_app() -> (axum::Router, MemoryStore) {
    let (state, store) = make_state();
    (create_router(state), store)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, json: &str) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

async fn body_bytes(resp: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap()
        .to_vec()
}

async fn body_json<T: serde::de::DeserializeOwned>(resp: axum::response::Response) -> T {
    serde_json::from_slice(&body_bytes(resp).await).unwrap()
}

// =============================================================================
// Store
// =============================================================================

#[tokio::test]
async fn test_embed_stores_document() {
    let (app, store) = make_app();
    let resp = app
        .oneshot(post_json(
            "/api/v1/vectors/embed",
            r#"{"content":"Wolves live in packs","contentType":"TEXT","category":"animals"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: StoreResult = body_json(resp).await;
    assert!(result.success);
    assert_eq!(result.message, "Document stored successfully");
    assert_eq!(result.category.as_deref(), Some("animals"));

    let stored = store.get(result.id.as_deref().unwrap()).unwrap();
    assert_eq!(stored.embedding.len(), 384);
}

#[tokio::test]
async fn test_embed_blank_content_returns_400() {
    let (app, store) = make_app();
    let resp = app
        .oneshot(post_json("/api/v1/vectors/embed", r#"{"content":"   "}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_embed_engine_down_returns_500() {
    let (app, store) = make_app();
    store.set_available(false);

    let resp = app
        .oneshot(post_json("/api/v1/vectors/embed", r#"{"content":"hello"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let result: StoreResult = body_json(resp).await;
    assert!(!result.success);
    assert!(result.id.is_none());
}

#[tokio::test]
async fn test_text_defaults_category_to_general() {
    let (app, store) = make_app();
    let resp = app
        .oneshot(post_json(
            "/api/v1/vectors/text",
            r#"{"content":"Rome is the Eternal City"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: StoreResult = body_json(resp).await;
    let stored = store.get(result.id.as_deref().unwrap()).unwrap();
    assert_eq!(stored.category, "general");
    assert_eq!(stored.content_type, ContentType::Text);
}

#[tokio::test]
async fn test_text_missing_content_returns_400() {
    let (app, _store) = make_app();
    let resp = app
        .oneshot(post_json("/api/v1/vectors/text", r#"{"category":"x"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = body_json(resp).await;
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["message"], "Content is required");
}

#[tokio::test]
async fn test_image_metadata_is_stored() {
    let (app, store) = make_app();
    let resp = app
        .oneshot(post_json(
            "/api/v1/vectors/image",
            r#"{"filename":"lion.png","description":"a lion resting in the shade"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: StoreResult = body_json(resp).await;
    assert_eq!(result.content_type, Some(ContentType::Image));

    let stored = store.get(result.id.as_deref().unwrap()).unwrap();
    assert_eq!(stored.content, "a lion resting in the shade");
    assert_eq!(stored.category, "images");
    assert_eq!(stored.media_url.as_deref(), Some("/media/images/lion.png"));
}

#[tokio::test]
async fn test_video_uses_filename_without_description() {
    let (app, store) = make_app();
    let resp = app
        .oneshot(post_json("/api/v1/vectors/video", r#"{"filename":"waves.mp4"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let result: StoreResult = body_json(resp).await;
    let stored = store.get(result.id.as_deref().unwrap()).unwrap();
    assert_eq!(stored.content, "waves.mp4");
    assert_eq!(stored.category, "videos");
    assert_eq!(stored.content_type, ContentType::Video);
    assert_eq!(stored.media_url.as_deref(), Some("/media/videos/waves.mp4"));
}

// =============================================================================
// Search
// =============================================================================

#[tokio::test]
async fn test_search_round_trip() {
    let (state, _store) = make_state();
    let app = create_router(state);

    let resp = app
        .clone()
        .oneshot(post_json(
            "/api/v1/vectors/text",
            r#"{"content":"Penguins are flightless birds"}"#,
        ))
        .await
        .unwrap();
    let stored: StoreResult = body_json(resp).await;

    let resp = app
        .oneshot(get(
            "/api/v1/vectors/search?query=penguins%20are%20flightless%20birds&limit=3",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let response: SearchResponse = body_json(resp).await;
    assert_eq!(response.query, "penguins are flightless birds");
    assert_eq!(response.results[0].id, stored.id.unwrap());
}

#[tokio::test]
async fn test_search_missing_query_returns_400() {
    let (app, _store) = make_app();
    let resp = app.oneshot(get("/api/v1/vectors/search")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_invalid_preferred_type_returns_400() {
    let (app, _store) = make_app();
    let resp = app
        .oneshot(get("/api/v1/vectors/search?query=x&preferredType=AUDIO"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_filters_media_by_default() {
    let (state, _store) = make_state();
    let app = create_router(state);

    for (uri, body) in [
        ("/api/v1/vectors/text", r#"{"content":"sunset"}"#),
        ("/api/v1/vectors/image", r#"{"filename":"sunset.png","description":"sunset"}"#),
    ] {
        let resp = app.clone().oneshot(post_json(uri, body)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = app
        .clone()
        .oneshot(get("/api/v1/vectors/search?query=sunset"))
        .await
        .unwrap();
    let text_only: SearchResponse = body_json(resp).await;
    assert_eq!(text_only.results.len(), 1);
    assert_eq!(text_only.results[0].content_type, ContentType::Text);

    let resp = app
        .clone()
        .oneshot(get("/api/v1/vectors/search?query=sunset&preferredType=IMAGE"))
        .await
        .unwrap();
    let images: SearchResponse = body_json(resp).await;
    assert_eq!(images.results.len(), 1);
    assert_eq!(images.results[0].content_type, ContentType::Image);

    let resp = app
        .oneshot(get("/api/v1/vectors/search?query=sunset&includeMedia=true"))
        .await
        .unwrap();
    let everything: SearchResponse = body_json(resp).await;
    assert_eq!(everything.results.len(), 2);
}

#[tokio::test]
async fn test_search_post_engine_down_returns_empty_200() {
    let (app, store) = make_app();
    store.set_available(false);

    let resp = app
        .oneshot(post_json(
            "/api/v1/vectors/search",
            r#"{"query":"anything","includeMedia":true,"limit":10}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let response: SearchResponse = body_json(resp).await;
    assert!(response.results.is_empty());
    assert_eq!(response.total_hits, 0);
    assert_eq!(response.query, "anything");
}

#[tokio::test]
async fn test_search_post_blank_query_returns_400() {
    let (app, _store) = make_app();
    let resp = app
        .oneshot(post_json("/api/v1/vectors/search", r#"{"query":""}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Delete / samples
// =============================================================================

#[tokio::test]
async fn test_delete_document() {
    let (state, store) = make_state();
    let app = create_router(state);

    let resp = app
        .clone()
        .oneshot(post_json("/api/v1/vectors/text", r#"{"content":"short-lived"}"#))
        .await
        .unwrap();
    let stored: StoreResult = body_json(resp).await;
    let id = stored.id.unwrap();

    let resp = app
        .oneshot(
            Request::delete(format!("/api/v1/vectors/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let deleted: DeleteResponse = body_json(resp).await;
    assert!(deleted.deleted);
    assert_eq!(deleted.id, id);
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_load_samples() {
    let (app, store) = make_app();
    let resp = app
        .oneshot(post_empty("/api/v1/vectors/load-samples"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let summary: SampleLoadSummary = body_json(resp).await;
    assert_eq!(summary.message, "Sample data loading completed");
    assert_eq!(summary.total_documents, 50);
    assert_eq!(summary.success_count, 50);
    assert_eq!(summary.fail_count, 0);
    assert_eq!(store.len(), 50);
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_up() {
    let (app, _store) = make_app();
    let resp = app.oneshot(get("/api/v1/health")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let report: HealthReport = body_json(resp).await;
    assert_eq!(report.status, HealthStatus::Up);
    assert!(report.component("application").is_some());
    assert!(report.component("embedding").is_some());
    assert!(report.component("engine").is_some());
}

#[tokio::test]
async fn test_health_down_returns_503() {
    let (app, store) = make_app();
    store.set_available(false);

    let resp = app.oneshot(get("/api/v1/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "DOWN");
    assert_eq!(body["components"]["engine"]["status"], "DOWN");
    assert_eq!(body["components"]["embedding"]["status"], "UP");
}

#[tokio::test]
async fn test_liveness_ignores_engine() {
    let (app, store) = make_app();
    store.set_available(false);

    let resp = app.oneshot(get("/api/v1/health/live")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], "UP");
}

#[tokio::test]
async fn test_readiness_lists_components() {
    let (state, store) = make_state();
    let app = create_router(state);

    let resp = app.clone().oneshot(get("/api/v1/health/ready")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let ready: ReadinessResponse = body_json(resp).await;
    assert_eq!(ready.components, vec!["application", "embedding", "engine"]);

    store.set_available(false);
    let resp = app.oneshot(get("/api/v1/health/ready")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_engine_health() {
    let (state, store) = make_state();
    let app = create_router(state);

    let resp = app.clone().oneshot(get("/api/v1/health/db")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let engine: ComponentHealth = body_json(resp).await;
    assert_eq!(engine.details["store"], "memory");

    store.set_available(false);
    let resp = app.oneshot(get("/api/v1/health/db")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
