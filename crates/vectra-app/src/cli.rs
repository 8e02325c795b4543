//! Command-line arguments.
//!
//! Priority: CLI flag > environment variable > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Vectra - embed documents and search them through a tensor-search engine.
#[derive(Parser, Debug)]
#[command(name = "vectra", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// API server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Search engine base URL, e.g. http://localhost:8080.
    #[arg(short = 'e', long = "engine-endpoint")]
    pub engine_endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Store the built-in sample corpus before serving.
    #[arg(long = "load-samples")]
    pub load_samples: bool,

    /// Keep documents in process memory instead of the search engine.
    #[arg(long = "in-memory")]
    pub in_memory: bool,
}

impl CliArgs {
    /// --config > VECTRA_CONFIG > ~/.vectra/config.toml
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("VECTRA_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// --port > VECTRA_PORT > config value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        std::env::var("VECTRA_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(config_port)
    }

    /// --engine-endpoint > VECTRA_ENGINE_ENDPOINT > config value.
    pub fn resolve_engine_endpoint(&self, config_endpoint: &str) -> String {
        if let Some(ref e) = self.engine_endpoint {
            return e.clone();
        }
        std::env::var("VECTRA_ENGINE_ENDPOINT").unwrap_or_else(|_| config_endpoint.to_string())
    }

    /// --log-level > config value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }
}

fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".vectra").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".vectra").join("config.toml");
    }
    PathBuf::from("config.toml")
}
