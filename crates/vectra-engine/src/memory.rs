//! In-process document store with brute-force cosine similarity ranking.
//!
//! Used by tests and by local runs without an engine. `set_available(false)`
//! makes every operation fail the way an unreachable engine would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use vectra_core::error::{Result, VectraError};
use vectra_core::types::{EngineStatus, SearchResponse, SearchResult, VectorDocument};

use crate::store::{DocumentStore, QueryFilter};

#[derive(Debug, Clone)]
pub struct MemoryStore {
    documents: Arc<RwLock<HashMap<String, VectorDocument>>>,
    available: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulate the engine going away (`false`) or coming back (`true`).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<VectorDocument> {
        self.documents.read().ok()?.get(id).cloned()
    }

    fn ensure_available(&self) -> Result<()> {
        if self.is_available() {
            Ok(())
        } else {
            Err(VectraError::Transport("memory store is unavailable".to_string()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> VectraError {
    VectraError::Engine(format!("Lock poisoned: {}", e))
}

impl DocumentStore for MemoryStore {
    async fn write(&self, document: &VectorDocument) -> Result<()> {
        self.ensure_available()?;
        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.insert(document.id.to_string(), document.clone());
        Ok(())
    }

    async fn query(
        &self,
        vector: &[f32],
        filter: &QueryFilter,
        limit: usize,
    ) -> Result<SearchResponse> {
        self.ensure_available()?;
        let documents = self.documents.read().map_err(poisoned)?;

        let mut scored: Vec<SearchResult> = documents
            .values()
            .filter(|doc| filter.matches(doc.content_type))
            .map(|doc| SearchResult {
                id: doc.id.to_string(),
                content: doc.content.clone(),
                content_type: doc.content_type,
                category: doc.category.clone(),
                description: doc.description.clone(),
                media_url: doc.media_url.clone(),
                score: cosine_similarity(vector, &doc.embedding),
            })
            .collect();

        let total_hits = scored.len() as u64;
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        Ok(SearchResponse {
            results: scored,
            total_hits,
            ..Default::default()
        })
    }

    /// Deleting an unknown id succeeds, as it does against the engine.
    async fn delete(&self, id: &str) -> Result<()> {
        self.ensure_available()?;
        let mut documents = self.documents.write().map_err(poisoned)?;
        documents.remove(id);
        Ok(())
    }

    async fn probe(&self) -> EngineStatus {
        if self.is_available() {
            EngineStatus {
                connected: true,
                status: "up".to_string(),
                message: format!("{} documents", self.len()),
            }
        } else {
            EngineStatus::unreachable("memory store is unavailable")
        }
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// Cosine similarity; 0.0 for mismatched lengths or a zero-magnitude vector.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let (dot, mag_a, mag_b) = a.iter().zip(b).fold((0.0f64, 0.0f64, 0.0f64), |acc, (x, y)| {
        let (x, y) = (*x as f64, *y as f64);
        (acc.0 + x * y, acc.1 + x * x, acc.2 + y * y)
    });

    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }
    dot / (mag_a.sqrt() * mag_b.sqrt())
}
