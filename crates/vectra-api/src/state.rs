//! Application state shared by all route handlers.

use std::sync::Arc;

use vectra_core::config::VectraConfig;
use vectra_engine::DynDocumentStore;
use vectra_vector::{Embedder, HealthAggregator, VectorPipeline};

/// Cloned into every handler via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup.
    pub config: Arc<VectraConfig>,
    pub pipeline: Arc<VectorPipeline>,
    pub health: Arc<HealthAggregator>,
}

impl AppState {
    /// Wire the pipeline and health aggregator over one embedder and store.
    pub fn new(
        config: VectraConfig,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn DynDocumentStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            pipeline: Arc::new(VectorPipeline::new(Arc::clone(&embedder), Arc::clone(&store))),
            health: Arc::new(HealthAggregator::new(embedder, store)),
        }
    }
}
