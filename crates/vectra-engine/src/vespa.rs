//! HTTP client for the external tensor-search engine.
//!
//! One `reqwest::Client` is shared by all callers; it owns the keep-alive
//! pool and closes idle connections after `pool.idle_timeout_secs`. A
//! semaphore caps in-flight requests at `pool.max_total`. A caller that
//! cannot get a slot within `pool.acquire_timeout_ms` fails with a transport
//! error.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Identity, StatusCode, Url};
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, info, warn};

use vectra_core::config::{EngineConfig, PoolConfig, VectraConfig};
use vectra_core::error::{Result, VectraError};
use vectra_core::types::{EngineStatus, SearchResponse, VectorDocument};

use crate::query::{build_yql, document_body, document_url, search_url, status_url, tensor_literal};
use crate::response::{parse_engine_status, parse_search_response};
use crate::store::{DocumentStore, QueryFilter};

/// Longest engine error body kept in an error message.
const MAX_ERROR_BODY: usize = 512;

/// Document store backed by the engine's document and search HTTP APIs.
#[derive(Debug, Clone)]
pub struct VespaStore {
    client: Client,
    base_url: String,
    namespace: String,
    document_type: String,
    permits: Arc<Semaphore>,
    acquire_timeout: Duration,
}

impl VespaStore {
    /// Build a client from the engine and pool settings.
    pub fn new(engine: &EngineConfig, pool: &PoolConfig) -> Result<Self> {
        let base_url = engine.base_url().to_string();
        reqwest::Url::parse(&base_url).map_err(|e| {
            VectraError::Config(format!("Invalid engine endpoint '{}': {}", base_url, e))
        })?;

        let mut builder = Client::builder()
            .connect_timeout(engine.connect_timeout())
            .timeout(engine.read_timeout())
            .pool_max_idle_per_host(pool.max_per_route)
            .pool_idle_timeout(pool.idle_timeout());

        if let Some(identity) = load_identity(engine)? {
            builder = builder.identity(identity);
        }

        let client = builder
            .build()
            .map_err(|e| VectraError::Config(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            endpoint = %base_url,
            namespace = %engine.namespace,
            document_type = %engine.document_type,
            tenant = %engine.tenant,
            application = %engine.application,
            instance = %engine.instance,
            max_total = pool.max_total,
            max_per_route = pool.max_per_route,
            "Search engine client initialized"
        );

        Ok(Self {
            client,
            base_url,
            namespace: engine.namespace.clone(),
            document_type: engine.document_type.clone(),
            permits: Arc::new(Semaphore::new(pool.max_total.max(1))),
            acquire_timeout: pool.acquire_timeout(),
        })
    }

    pub fn from_config(config: &VectraConfig) -> Result<Self> {
        Self::new(&config.engine, &config.pool)
    }

    /// Requests that could start right now without waiting.
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }

    fn document_url(&self, id: &str) -> Result<Url> {
        document_url(&self.base_url, &self.namespace, &self.document_type, id)
    }

    async fn acquire(&self) -> Result<SemaphorePermit<'_>> {
        match tokio::time::timeout(self.acquire_timeout, self.permits.acquire()).await {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(VectraError::Transport(
                "connection pool closed".to_string(),
            )),
            Err(_) => Err(VectraError::Transport(format!(
                "connection pool exhausted after {} ms",
                self.acquire_timeout.as_millis()
            ))),
        }
    }
}

impl DocumentStore for VespaStore {
    async fn write(&self, document: &VectorDocument) -> Result<()> {
        let url = self.document_url(&document.id.to_string())?;
        debug!(url = %url, "Storing document");

        let body = document_body(document);
        let _permit = self.acquire().await?;
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %text, "Engine store response");

        if status.is_success() {
            Ok(())
        } else {
            Err(rejected(status, text))
        }
    }

    async fn query(
        &self,
        vector: &[f32],
        filter: &QueryFilter,
        limit: usize,
    ) -> Result<SearchResponse> {
        let yql = build_yql(filter, limit);
        let url = search_url(&self.base_url, &yql, &tensor_literal(vector))?;
        debug!(yql = %yql, dimensions = vector.len(), "Querying search engine");

        let _permit = self.acquire().await?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(rejected(status, text));
        }

        let parsed = parse_search_response(&text);
        debug!(hits = parsed.results.len(), total = parsed.total_hits, "Engine search response");
        Ok(parsed)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.document_url(id)?;
        let _permit = self.acquire().await?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(rejected(status, text))
        }
    }

    async fn probe(&self) -> EngineStatus {
        let _permit = match self.acquire().await {
            Ok(permit) => permit,
            Err(e) => return EngineStatus::unreachable(e.to_string()),
        };

        match self.client.get(status_url(&self.base_url)).send().await {
            Ok(response) if response.status() == StatusCode::OK => {
                let body = response.text().await.unwrap_or_default();
                parse_engine_status(&body)
            }
            Ok(response) => EngineStatus {
                connected: false,
                status: "unhealthy".to_string(),
                message: format!("HTTP {}", response.status().as_u16()),
            },
            Err(e) => {
                warn!(error = %e, endpoint = %self.base_url, "Search engine health check failed");
                EngineStatus::unreachable(e.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        "vespa"
    }
}

fn transport_error(err: reqwest::Error) -> VectraError {
    if err.is_timeout() {
        VectraError::Transport(format!("request timed out: {}", err))
    } else {
        VectraError::Transport(err.to_string())
    }
}

fn rejected(status: StatusCode, mut body: String) -> VectraError {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    VectraError::Rejected {
        status: status.as_u16(),
        message: body,
    }
}

/// Load a PEM client identity when both certificate and key are configured.
fn load_identity(engine: &EngineConfig) -> Result<Option<Identity>> {
    match (&engine.certificate_path, &engine.private_key_path) {
        (Some(cert_path), Some(key_path)) => {
            let mut pem = std::fs::read(cert_path)?;
            pem.push(b'\n');
            pem.extend(std::fs::read(key_path)?);
            let identity = Identity::from_pem(&pem).map_err(|e| {
                VectraError::Config(format!("Invalid client certificate or key: {}", e))
            })?;
            info!(certificate = %cert_path, "Loaded engine client identity");
            Ok(Some(identity))
        }
        _ => Ok(None),
    }
}
