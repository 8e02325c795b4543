//! Store and search use cases.
//!
//! The pipeline embeds content, builds documents and hands them to the
//! document store. Every failure or panic below it is folded into the returned value:
//! a failed store is a `StoreResult` with `success: false`, and a failed search
//! is an empty `SearchResponse`.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use futures::FutureExt;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use vectra_core::error::{Result, VectraError};
use vectra_core::types::{
    ContentType, SampleLoadSummary, SearchQuery, SearchResponse, StoreRequest, StoreResult,
    VectorDocument,
};
use vectra_engine::{DynDocumentStore, QueryFilter};

use crate::embedding::Embedder;
use crate::health::panic_message;
use crate::samples::sample_requests;

/// Longest query prefix written to logs.
const LOGGED_QUERY_CHARS: usize = 50;

pub struct VectorPipeline {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn DynDocumentStore>,
}

impl VectorPipeline {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn DynDocumentStore>) -> Self {
        Self { embedder, store }
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    pub fn store(&self) -> &Arc<dyn DynDocumentStore> {
        &self.store
    }

    /// Embed and persist one piece of content.
    pub async fn store_document(&self, request: StoreRequest) -> StoreResult {
        let content_type = request.content_type.unwrap_or_default();
        info!(content_type = %content_type, store = self.store.name(), "Storing document");

        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            self.build_document(&request, content_type)
        }));
        let document = match built {
            Ok(Ok(document)) => document,
            Ok(Err(e)) => {
                error!(error = %e, content_type = %content_type, "Failed to build document");
                return failed_store(request.content, content_type, format!("Error: {}", e));
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(error = %message, content_type = %content_type, "Embedder panicked");
                return failed_store(request.content, content_type, format!("Error: {}", message));
            }
        };

        let written = AssertUnwindSafe(self.store.write_boxed(&document))
            .catch_unwind()
            .await;
        match written {
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(id = %document.id, error = %message, "Document store panicked on write");
                failed_store(document.content, content_type, format!("Error: {}", message))
            }
            Ok(Ok(())) => {
                info!(id = %document.id, category = %document.category, "Document stored");
                StoreResult {
                    id: Some(document.id.to_string()),
                    content: document.content,
                    content_type: Some(content_type),
                    category: request.category,
                    message: "Document stored successfully".to_string(),
                    success: true,
                }
            }
            Ok(Err(e)) => {
                warn!(id = %document.id, error = %e, kind = e.kind(), "Search engine rejected document");
                failed_store(
                    document.content,
                    content_type,
                    format!("Failed to store document in search engine: {}", e),
                )
            }
        }
    }

    fn build_document(
        &self,
        request: &StoreRequest,
        content_type: ContentType,
    ) -> Result<VectorDocument> {
        let embedding = self.embedder.embed(&request.content, content_type)?;
        if embedding.len() != self.embedder.dimensions() {
            return Err(VectraError::Embedding(format!(
                "expected {} dimensions, got {}",
                self.embedder.dimensions(),
                embedding.len()
            )));
        }

        Ok(VectorDocument {
            id: Uuid::new_v4(),
            content: request.content.clone(),
            content_type,
            embedding,
            category: request.category.clone().unwrap_or_default(),
            description: request.description.clone(),
            media_url: request.media_url.clone(),
            created_at: Utc::now(),
        })
    }

    /// Nearest-neighbor search for the query text.
    ///
    /// The query is always embedded as TEXT, whatever type is being searched
    /// for.
    pub async fn search(&self, query: &SearchQuery) -> SearchResponse {
        let started = Instant::now();
        let limit = query.effective_limit();
        let filter = QueryFilter::from_preferences(query.preferred_type, query.include_media);
        info!(
            query = %truncate(&query.query, LOGGED_QUERY_CHARS),
            filter = ?filter.content_type,
            limit,
            "Searching"
        );

        let embedded = panic::catch_unwind(AssertUnwindSafe(|| {
            self.embedder.embed(&query.query, ContentType::Text)
        }))
        .unwrap_or_else(|payload| Err(panicked(payload.as_ref())));
        let vector = match embedded {
            Ok(vector) => vector,
            Err(e) => {
                error!(error = %e, "Failed to embed search query");
                return SearchResponse::empty(&query.query);
            }
        };

        let queried = AssertUnwindSafe(self.store.query_boxed(&vector, &filter, limit))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(panicked(payload.as_ref())));
        match queried {
            Ok(mut response) => {
                response.query = query.query.clone();
                response.search_time_ms = started.elapsed().as_millis() as u64;
                debug!(
                    hits = response.results.len(),
                    total = response.total_hits,
                    elapsed_ms = response.search_time_ms,
                    "Search complete"
                );
                response
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Search failed, returning empty results");
                SearchResponse::empty(&query.query)
            }
        }
    }

    /// Remove a document. Returns false when the store reports any failure.
    pub async fn delete(&self, id: &str) -> bool {
        let deleted = AssertUnwindSafe(self.store.delete_boxed(id))
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(panicked(payload.as_ref())));
        match deleted {
            Ok(()) => {
                info!(id = %id, "Document deleted");
                true
            }
            Err(e) => {
                warn!(id = %id, error = %e, "Failed to delete document");
                false
            }
        }
    }

    /// Store the built-in animal and city corpus.
    pub async fn load_samples(&self) -> SampleLoadSummary {
        let requests = sample_requests();
        let total_documents = requests.len();
        let mut success_count = 0;

        for request in requests {
            if self.store_document(request).await.success {
                success_count += 1;
            }
        }

        let fail_count = total_documents - success_count;
        info!(total_documents, success_count, fail_count, "Loaded sample documents");

        SampleLoadSummary {
            message: "Sample data loading completed".to_string(),
            total_documents,
            success_count,
            fail_count,
        }
    }
}

fn failed_store(content: String, content_type: ContentType, message: String) -> StoreResult {
    StoreResult {
        id: None,
        content,
        content_type: Some(content_type),
        category: None,
        message,
        success: false,
    }
}

/// A panic below the pipeline, as an engine error.
fn panicked(payload: &(dyn std::any::Any + Send)) -> VectraError {
    VectraError::Engine(format!("panicked: {}", panic_message(payload)))
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
