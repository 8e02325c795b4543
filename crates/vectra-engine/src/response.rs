//! Parsing of engine search and status payloads.
//!
//! Parsing never fails: a payload that does not match the expected shape is
//! treated as an empty result set.

use serde::Deserialize;
use tracing::warn;

use vectra_core::types::{ContentType, EngineStatus, SearchResponse, SearchResult};

#[derive(Debug, Default, Deserialize)]
struct EngineSearchBody {
    #[serde(default)]
    root: EngineRoot,
}

#[derive(Debug, Default, Deserialize)]
struct EngineRoot {
    #[serde(default)]
    children: Option<Vec<EngineHit>>,
    #[serde(default)]
    fields: EngineRootFields,
}

#[derive(Debug, Default, Deserialize)]
struct EngineRootFields {
    #[serde(rename = "totalCount")]
    total_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct EngineHit {
    #[serde(default)]
    id: String,
    #[serde(default)]
    relevance: f64,
    #[serde(default)]
    fields: EngineHitFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EngineHitFields {
    content: String,
    content_type: Option<String>,
    category: String,
    description: String,
    media_url: String,
}

/// Parse an engine search response into ranked results.
///
/// Hit order is preserved. `totalCount` falls back to the number of parsed
/// hits. The returned response has no query text or timing; the caller fills
/// those in.
pub fn parse_search_response(body: &str) -> SearchResponse {
    let parsed: EngineSearchBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "Malformed search response, treating as empty");
            return SearchResponse::default();
        }
    };

    let Some(children) = parsed.root.children else {
        return SearchResponse::default();
    };

    let results: Vec<SearchResult> = children.into_iter().map(into_result).collect();
    let total_hits = parsed
        .root
        .fields
        .total_count
        .unwrap_or(results.len() as u64);

    SearchResponse {
        results,
        total_hits,
        ..Default::default()
    }
}

fn into_result(hit: EngineHit) -> SearchResult {
    let fields = hit.fields;
    SearchResult {
        id: local_document_id(&hit.id).to_string(),
        content: fields.content,
        content_type: fields
            .content_type
            .as_deref()
            .and_then(|ct| ct.parse().ok())
            .unwrap_or(ContentType::Text),
        category: fields.category,
        description: non_empty(fields.description),
        media_url: non_empty(fields.media_url),
        score: hit.relevance,
    }
}

/// Strip the engine's `id:<namespace>:<doctype>::` prefix, leaving the id the
/// document was stored under.
pub fn local_document_id(engine_id: &str) -> &str {
    if engine_id.starts_with("id:") {
        engine_id
            .split_once("::")
            .map(|(_, local)| local)
            .unwrap_or(engine_id)
    } else {
        engine_id
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Default, Deserialize)]
struct StatusBody {
    #[serde(default)]
    status: StatusFields,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StatusFields {
    code: Option<String>,
    message: Option<String>,
}

/// Interpret the body of a 200 status probe response.
///
/// The engine answered, so the result is always `connected`; an unreadable
/// body yields status `unknown`.
pub fn parse_engine_status(body: &str) -> EngineStatus {
    let fields = serde_json::from_str::<StatusBody>(body)
        .map(|b| b.status)
        .unwrap_or_default();
    EngineStatus {
        connected: true,
        status: fields.code.unwrap_or_else(|| "unknown".to_string()),
        message: fields.message.unwrap_or_default(),
    }
}
