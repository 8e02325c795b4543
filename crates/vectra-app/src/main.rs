//! Vectra application binary - composition root.
//!
//! 1. Parse CLI arguments and load the TOML configuration
//! 2. Install the tracing subscriber
//! 3. Build the embedder and the document store (engine client or in-memory)
//! 4. Optionally load the sample corpus
//! 5. Serve the REST API until ctrl-c

mod cli;

use std::sync::Arc;

use clap::Parser;

use vectra_api::routes;
use vectra_api::state::AppState;
use vectra_core::config::VectraConfig;
use vectra_engine::{DynDocumentStore, MemoryStore, VespaStore};
use vectra_vector::{DeterministicEmbedder, Embedder};

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config is read before logging so its log level can seed the filter.
    let config_file = args.resolve_config_path();
    let (mut config, load_error) = if config_file.exists() {
        match VectraConfig::load(&config_file) {
            Ok(config) => (config, None),
            Err(e) => (VectraConfig::default(), Some(e)),
        }
    } else {
        (VectraConfig::default(), None)
    };

    config.general.port = args.resolve_port(config.general.port);
    config.general.log_level = args.resolve_log_level(&config.general.log_level);
    config.engine.endpoint = args.resolve_engine_endpoint(&config.engine.endpoint);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Vectra v{}", env!("CARGO_PKG_VERSION"));
    match load_error {
        Some(e) => tracing::warn!(
            path = %config_file.display(),
            error = %e,
            "Failed to load config, using defaults"
        ),
        None => tracing::info!(path = %config_file.display(), "Configuration loaded"),
    }

    config.validate()?;

    let embedder: Arc<dyn Embedder> = Arc::new(DeterministicEmbedder::new(&config.embedding));
    tracing::info!(
        model = %config.embedding.model,
        dimension = config.embedding.dimension,
        "Embedder ready"
    );

    let store: Arc<dyn DynDocumentStore> = if args.in_memory {
        tracing::warn!("Using in-memory document store; documents are lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(VespaStore::from_config(&config)?)
    };

    let status = store.probe_boxed().await;
    if status.connected {
        tracing::info!(store = store.name(), status = %status.status, "Document store reachable");
    } else {
        tracing::warn!(
            store = store.name(),
            message = %status.message,
            "Document store not reachable yet; requests will fail until it is"
        );
    }

    let state = AppState::new(config.clone(), embedder, store);

    if args.load_samples {
        let summary = state.pipeline.load_samples().await;
        tracing::info!(
            success = summary.success_count,
            failed = summary.fail_count,
            "Sample corpus loaded"
        );
    }

    routes::start_server(&config, state).await?;

    tracing::info!("Vectra stopped");
    Ok(())
}
