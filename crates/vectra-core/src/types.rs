use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::VectraError;

/// Result count used when a search does not ask for a positive limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 5;

// =============================================================================
// Enums
// =============================================================================

/// The kind of content a document holds.
///
/// Drives which embedding derivation is used and which default search filter
/// applies. Serialized in upper case (`TEXT`, `IMAGE`, `VIDEO`), which is also
/// how the engine stores it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    #[default]
    #[serde(alias = "text")]
    Text,
    #[serde(alias = "image")]
    Image,
    #[serde(alias = "video")]
    Video,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "TEXT",
            ContentType::Image => "IMAGE",
            ContentType::Video => "VIDEO",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = VectraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TEXT" => Ok(ContentType::Text),
            "IMAGE" => Ok(ContentType::Image),
            "VIDEO" => Ok(ContentType::Video),
            other => Err(VectraError::Parse(format!(
                "unknown content type '{}'",
                other
            ))),
        }
    }
}

/// Status of a single health component or of the whole service.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Up,
    Down,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up)
    }
}

// =============================================================================
// Documents
// =============================================================================

/// A stored item: content, its embedding and descriptive metadata.
///
/// Built once per store call and handed to the document store, which owns it
/// from then on. The embedding always has the configured dimension and unit
/// Euclidean norm.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorDocument {
    pub id: Uuid,
    /// Text, or a textual surrogate (filename/description) for media.
    pub content: String,
    pub content_type: ContentType,
    pub embedding: Vec<f32>,
    pub category: String,
    pub description: Option<String>,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl VectorDocument {
    /// Creation time as epoch milliseconds, the engine's timestamp format.
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }
}

// =============================================================================
// Store
// =============================================================================

/// Input for a store operation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRequest {
    pub content: String,
    #[serde(default)]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
}

impl StoreRequest {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: Some(ContentType::Text),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Outcome of a store operation. Failures carry a message instead of an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    pub content_type: Option<ContentType>,
    pub category: Option<String>,
    pub message: String,
    pub success: bool,
}

/// Summary of a bulk sample load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleLoadSummary {
    pub message: String,
    pub total_documents: usize,
    pub success_count: usize,
    pub fail_count: usize,
}

// =============================================================================
// Search
// =============================================================================

/// A similarity search request.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub query: String,
    #[serde(default)]
    pub preferred_type: Option<ContentType>,
    #[serde(default)]
    pub include_media: bool,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_preferred_type(mut self, content_type: ContentType) -> Self {
        self.preferred_type = Some(content_type);
        self
    }

    pub fn with_media(mut self, include_media: bool) -> Self {
        self.include_media = include_media;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The requested limit, or [`DEFAULT_SEARCH_LIMIT`] when unset or non-positive.
    pub fn effective_limit(&self) -> usize {
        match self.limit {
            Some(n) if n > 0 => n as usize,
            _ => DEFAULT_SEARCH_LIMIT,
        }
    }
}

/// A single ranked hit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub content: String,
    pub content_type: ContentType,
    pub category: String,
    pub description: Option<String>,
    pub media_url: Option<String>,
    /// Engine-defined relevance; higher is more relevant.
    pub score: f64,
}

/// Ranked hits plus totals, in engine relevance order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total_hits: u64,
    pub query: String,
    pub search_time_ms: u64,
}

impl SearchResponse {
    /// The degraded response returned when a search cannot be served.
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

// =============================================================================
// Health
// =============================================================================

/// What the search engine reports about itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStatus {
    /// Whether the engine answered the status probe with HTTP 200.
    pub connected: bool,
    /// Engine status code, or `unhealthy` / `unreachable`.
    pub status: String,
    pub message: String,
}

impl EngineStatus {
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            connected: false,
            status: "unreachable".to_string(),
            message: message.into(),
        }
    }
}

/// Health of one named component.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: String,
    #[serde(default)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl ComponentHealth {
    pub fn up(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Up,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn down(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Down,
            message: message.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}

/// Composite health: UP only when every component is UP.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub components: BTreeMap<String, ComponentHealth>,
}

impl HealthReport {
    pub fn from_components(components: BTreeMap<String, ComponentHealth>) -> Self {
        let status = if components.values().all(|c| c.status.is_up()) {
            HealthStatus::Up
        } else {
            HealthStatus::Down
        };
        Self {
            status,
            timestamp: Utc::now(),
            components,
        }
    }

    pub fn is_up(&self) -> bool {
        self.status.is_up()
    }

    pub fn component(&self, name: &str) -> Option<&ComponentHealth> {
        self.components.get(name)
    }
}
