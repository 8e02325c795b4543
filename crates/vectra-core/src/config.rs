use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, VectraError};

/// Top-level configuration for the Vectra service.
///
/// Loaded once at startup from a TOML file and then passed by reference into
/// the constructors that need it. Nothing mutates it afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VectraConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub pool: PoolConfig,
}

impl VectraConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VectraConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Check the values the rest of the service relies on.
    pub fn validate(&self) -> Result<()> {
        if self.embedding.dimension == 0 {
            return Err(VectraError::Config(
                "embedding.dimension must be a positive integer".to_string(),
            ));
        }
        let endpoint = self.engine.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(VectraError::Config(format!(
                "engine.endpoint must be an http(s) URL, got '{}'",
                endpoint
            )));
        }
        if self.engine.namespace.is_empty() || self.engine.document_type.is_empty() {
            return Err(VectraError::Config(
                "engine.namespace and engine.document_type must not be empty".to_string(),
            ));
        }
        if self.pool.max_total == 0 || self.pool.max_per_route == 0 {
            return Err(VectraError::Config(
                "pool.max_total and pool.max_per_route must be positive".to_string(),
            ));
        }
        if self.engine.certificate_path.is_some() != self.engine.private_key_path.is_some() {
            return Err(VectraError::Config(
                "engine.certificate_path and engine.private_key_path must be set together"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// General service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// HTTP API port.
    pub port: u16,
    /// Address the HTTP API binds to.
    pub bind_address: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            port: 8081,
            bind_address: "127.0.0.1".to_string(),
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Model label reported by health checks.
    pub model: String,
    /// Length of every generated vector.
    pub dimension: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            dimension: 384,
        }
    }
}

/// Connection settings for the external tensor-search engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL, e.g. `http://localhost:8080`.
    pub endpoint: String,
    /// Document namespace on the engine.
    pub namespace: String,
    /// Document type on the engine.
    pub document_type: String,
    pub tenant: String,
    pub application: String,
    pub instance: String,
    /// PEM client certificate for mutual TLS.
    pub certificate_path: Option<String>,
    /// PEM private key matching `certificate_path`.
    pub private_key_path: Option<String>,
    pub connect_timeout_ms: u64,
    pub read_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            namespace: "vectordb".to_string(),
            document_type: "embedding".to_string(),
            tenant: "default".to_string(),
            application: "vector-app".to_string(),
            instance: "default".to_string(),
            certificate_path: None,
            private_key_path: None,
            connect_timeout_ms: 5_000,
            read_timeout_ms: 30_000,
        }
    }
}

impl EngineConfig {
    /// Endpoint without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.endpoint.trim().trim_end_matches('/')
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

/// Outbound connection pool limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Maximum concurrent requests to the engine.
    pub max_total: usize,
    /// Maximum idle connections kept per host.
    pub max_per_route: usize,
    /// Idle connections older than this are closed.
    pub idle_timeout_secs: u64,
    /// How long a caller waits for a free connection slot.
    pub acquire_timeout_ms: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_total: 100,
            max_per_route: 20,
            idle_timeout_secs: 300,
            acquire_timeout_ms: 5_000,
        }
    }
}

impl PoolConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = VectraConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.port, 8081);
        assert_eq!(config.embedding.dimension, 384);
        assert_eq!(config.engine.endpoint, "http://localhost:8080");
        assert_eq!(config.engine.namespace, "vectordb");
        assert_eq!(config.engine.document_type, "embedding");
        assert_eq!(config.engine.connect_timeout_ms, 5_000);
        assert_eq!(config.engine.read_timeout_ms, 30_000);
        assert_eq!(config.pool.max_total, 100);
        assert_eq!(config.pool.max_per_route, 20);
        assert_eq!(config.pool.idle_timeout_secs, 300);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(
            r#"
[general]
log_level = "debug"
port = 9000

[embedding]
dimension = 128

[engine]
endpoint = "http://vespa.internal:8080/"
namespace = "docs"
read_timeout_ms = 1000

[pool]
max_total = 8
"#,
        );

        let config = VectraConfig::load(file.path()).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.port, 9000);
        assert_eq!(config.embedding.dimension, 128);
        assert_eq!(config.engine.base_url(), "http://vespa.internal:8080");
        assert_eq!(config.engine.namespace, "docs");
        assert_eq!(config.engine.document_type, "embedding");
        assert_eq!(config.engine.read_timeout(), Duration::from_secs(1));
        assert_eq!(config.pool.max_total, 8);
        assert_eq!(config.pool.max_per_route, 20);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = VectraConfig::load(file.path()).unwrap();
        assert_eq!(config.embedding.dimension, 384);
        assert_eq!(config.engine.endpoint, "http://localhost:8080");
    }

    #[test]
    fn test_load_invalid_toml() {
        let file = create_temp_config("this is [[[ not toml");
        let err = VectraConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, VectraError::Config(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = VectraConfig::load_or_default(Path::new("/does/not/exist/vectra.toml"));
        assert_eq!(config.embedding.dimension, 384);
        assert_eq!(config.general.port, 8081);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("vectra.toml");

        let mut config = VectraConfig::default();
        config.embedding.dimension = 64;
        config.engine.endpoint = "https://engine.example:443".to_string();
        config.save(&path).unwrap();

        let reloaded = VectraConfig::load(&path).unwrap();
        assert_eq!(reloaded.embedding.dimension, 64);
        assert_eq!(reloaded.engine.endpoint, "https://engine.example:443");
    }

    #[test]
    fn test_validate_rejects_zero_dimension() {
        let mut config = VectraConfig::default();
        config.embedding.dimension = 0;
        assert!(matches!(config.validate(), Err(VectraError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_non_http_endpoint() {
        let mut config = VectraConfig::default();
        config.engine.endpoint = "localhost:8080".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_half_configured_tls() {
        let mut config = VectraConfig::default();
        config.engine.certificate_path = Some("/etc/vectra/cert.pem".to_string());
        assert!(config.validate().is_err());

        config.engine.private_key_path = Some("/etc/vectra/key.pem".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_pool() {
        let mut config = VectraConfig::default();
        config.pool.max_total = 0;
        assert!(config.validate().is_err());
    }
}
