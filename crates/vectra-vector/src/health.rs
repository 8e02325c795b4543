//! Composite health report over the process, the embedder and the engine.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use tracing::{error, warn};

use vectra_core::types::{ComponentHealth, ContentType, HealthReport};
use vectra_engine::DynDocumentStore;

use crate::embedding::Embedder;

pub const APPLICATION: &str = "application";
pub const EMBEDDING: &str = "embedding";
pub const ENGINE: &str = "engine";

/// Text embedded by the readiness check.
const PROBE_TEXT: &str = "health check";

pub struct HealthAggregator {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn DynDocumentStore>,
    started: Instant,
}

impl HealthAggregator {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn DynDocumentStore>) -> Self {
        Self {
            embedder,
            store,
            started: Instant::now(),
        }
    }

    /// Evaluate every component. Never fails; a failing or panicking check
    /// only marks its own component DOWN.
    pub async fn report(&self) -> HealthReport {
        let mut components = BTreeMap::new();
        components.insert(APPLICATION.to_string(), self.application());
        components.insert(EMBEDDING.to_string(), self.embedding());
        components.insert(ENGINE.to_string(), self.engine().await);

        let report = HealthReport::from_components(components);
        if !report.is_up() {
            let down: Vec<&str> = report
                .components
                .iter()
                .filter(|(_, c)| !c.status.is_up())
                .map(|(name, _)| name.as_str())
                .collect();
            warn!(components = ?down, "Health check reports DOWN");
        }
        report
    }

    /// Engine component alone.
    pub async fn engine(&self) -> ComponentHealth {
        let store_name = self.store.name().to_string();
        match AssertUnwindSafe(self.store.probe_boxed()).catch_unwind().await {
            Ok(status) => {
                let health = if status.connected {
                    ComponentHealth::up("Search engine is connected and healthy")
                } else {
                    ComponentHealth::down(format!(
                        "Search engine connection failed: {}",
                        status.message
                    ))
                };
                health
                    .with_detail("connected", status.connected)
                    .with_detail("engineStatus", status.status)
                    .with_detail("store", store_name)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(store = %store_name, error = %message, "Engine probe panicked");
                ComponentHealth::down(format!("Error: {}", message))
                    .with_detail("error", "panic")
                    .with_detail("store", store_name)
            }
        }
    }

    pub fn embedding(&self) -> ComponentHealth {
        let embedder = &self.embedder;
        let dimension = embedder.dimensions();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            if !embedder.is_ready() {
                return Err("embedder is not ready".to_string());
            }
            match embedder.embed(PROBE_TEXT, ContentType::Text) {
                Ok(v) if v.len() == dimension => Ok(()),
                Ok(v) => Err(format!("expected {} dimensions, got {}", dimension, v.len())),
                Err(e) => Err(format!("{} ({})", e, e.kind())),
            }
        }));

        match outcome {
            Ok(Ok(())) => ComponentHealth::up("Embedding service is operational")
                .with_detail("embeddingDimension", dimension)
                .with_detail("model", embedder.model())
                .with_detail("modelStatus", "ready"),
            Ok(Err(message)) => {
                warn!(error = %message, "Embedding check failed");
                ComponentHealth::down(format!("Error: {}", message))
                    .with_detail("embeddingDimension", dimension)
                    .with_detail("error", "EmbeddingError")
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(error = %message, "Embedding check panicked");
                ComponentHealth::down(format!("Error: {}", message)).with_detail("error", "panic")
            }
        }
    }

    pub fn application(&self) -> ComponentHealth {
        let processors = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        ComponentHealth::up("Application is running")
            .with_detail("version", env!("CARGO_PKG_VERSION"))
            .with_detail("availableProcessors", processors)
            .with_detail("uptimeSecs", self.started.elapsed().as_secs())
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
