//! Builders for the engine's wire formats: document URLs and bodies, YQL
//! nearest-neighbor expressions, and tensor literals.

use reqwest::Url;
use serde_json::{json, Value};

use vectra_core::error::{Result, VectraError};
use vectra_core::types::VectorDocument;

use crate::store::QueryFilter;

/// Rank profile the engine's schema defines for embedding similarity.
pub const RANKING_PROFILE: &str = "semantic";

/// Build the YQL expression for a nearest-neighbor query.
///
/// `targetHits` and the result limit are both set to `limit`.
pub fn build_yql(filter: &QueryFilter, limit: usize) -> String {
    let mut yql = String::from("select * from sources * where ");
    if let Some(content_type) = filter.content_type {
        yql.push_str(&format!("content_type contains '{}' and ", content_type.as_str()));
    }
    yql.push_str(&format!(
        "{{targetHits: {}}}nearestNeighbor(embedding, q) limit {}",
        limit, limit
    ));
    yql
}

/// Encode a vector as the engine's tensor literal: `[v1,v2,...]`.
pub fn tensor_literal(vector: &[f32]) -> String {
    let values: Vec<String> = vector.iter().map(|v| v.to_string()).collect();
    format!("[{}]", values.join(","))
}

/// `{base}/document/v1/{namespace}/{doctype}/docid/{id}`
///
/// Each part is one percent-encoded path segment, so `/`, `?` and `#` in an
/// id stay inside the id.
pub fn document_url(
    base_url: &str,
    namespace: &str,
    document_type: &str,
    id: &str,
) -> Result<Url> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(VectraError::Parse(format!("Invalid document id '{}'", id)));
    }
    let mut url = Url::parse(base_url)
        .map_err(|e| VectraError::Config(format!("Invalid engine endpoint '{}': {}", base_url, e)))?;
    url.path_segments_mut()
        .map_err(|_| VectraError::Config(format!("Engine endpoint '{}' cannot be a base", base_url)))?
        .pop_if_empty()
        .extend(["document", "v1", namespace, document_type, "docid", id]);
    Ok(url)
}

/// `{base}/search/` with the YQL, rank profile and query tensor as
/// URL-encoded parameters.
pub fn search_url(base_url: &str, yql: &str, tensor: &str) -> Result<Url> {
    Url::parse_with_params(
        &format!("{}/search/", base_url),
        &[
            ("yql", yql),
            ("ranking", RANKING_PROFILE),
            ("input.query(q)", tensor),
        ],
    )
    .map_err(|e| VectraError::Config(format!("Invalid search URL for '{}': {}", base_url, e)))
}

/// `{base}/state/v1/health`
pub fn status_url(base_url: &str) -> String {
    format!("{}/state/v1/health", base_url)
}

/// Request body for a document write: `{"fields": {...}}`.
///
/// Missing optional metadata is written as an empty string so every stored
/// document has the same field set.
pub fn document_body(document: &VectorDocument) -> Value {
    json!({
        "fields": {
            "content": document.content,
            "content_type": document.content_type.as_str(),
            "category": document.category,
            "description": document.description.as_deref().unwrap_or(""),
            "media_url": document.media_url.as_deref().unwrap_or(""),
            "created_at": document.created_at_millis(),
            "embedding": { "values": document.embedding },
        }
    })
}
