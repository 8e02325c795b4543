//! Vectra vector crate - embedding, the store/search pipeline, health rollup
//! and the built-in sample corpus.
//!
//! Everything here is written against the `Embedder` trait and the
//! `DynDocumentStore` seam from `vectra-engine`, so the same pipeline runs over
//! the HTTP engine client or the in-memory store.

pub mod embedding;
pub mod health;
pub mod pipeline;
pub mod samples;

pub use embedding::{DeterministicEmbedder, Embedder};
pub use health::HealthAggregator;
pub use pipeline::VectorPipeline;
pub use samples::sample_requests;
