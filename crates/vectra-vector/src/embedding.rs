//! Embedding trait and the deterministic, hash-seeded implementation.
//!
//! `DeterministicEmbedder` needs no model: a SHA-256 digest of the content
//! seeds a ChaCha PRNG, which yields `dimension` standard-normal samples that
//! are then L2-normalized. Identical (content type, content) pairs produce
//! bit-identical vectors on every run and every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};
use tracing::error;

use vectra_core::config::EmbeddingConfig;
use vectra_core::error::{Result, VectraError};
use vectra_core::types::ContentType;

/// Maps content to a fixed-length unit vector.
///
/// Implementations must be pure: the same input always gives the same
/// vector, and every vector has length `dimensions()` and unit norm.
pub trait Embedder: Send + Sync {
    fn embed(&self, content: &str, content_type: ContentType) -> Result<Vec<f32>>;

    fn dimensions(&self) -> usize;

    /// Model label reported by health checks.
    fn model(&self) -> &str;

    fn is_ready(&self) -> bool {
        self.dimensions() > 0
    }
}

/// Hash-seeded Gaussian embedder.
#[derive(Debug, Clone)]
pub struct DeterministicEmbedder {
    dimension: usize,
    model: String,
}

impl DeterministicEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Self {
        Self {
            dimension: config.dimension,
            model: config.model.clone(),
        }
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension,
            ..Self::new(&EmbeddingConfig::default())
        }
    }

    pub fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(text, ContentType::Text)
    }

    /// Embed an image by its description (or filename when there is none).
    pub fn embed_image(&self, description: &str) -> Result<Vec<f32>> {
        self.embed(description, ContentType::Image)
    }

    pub fn embed_video(&self, description: &str) -> Result<Vec<f32>> {
        self.embed(description, ContentType::Video)
    }
}

impl Embedder for DeterministicEmbedder {
    fn embed(&self, content: &str, content_type: ContentType) -> Result<Vec<f32>> {
        let key = canonical_key(content, content_type);
        let mut rng = ChaCha8Rng::seed_from_u64(seed_for(&key));
        let mut gaussian = Gaussian::default();

        let raw: Vec<f64> = (0..self.dimension)
            .map(|_| gaussian.sample(&mut rng))
            .collect();

        normalize(&raw).inspect_err(|e| {
            error!(
                content_type = %content_type,
                dimension = self.dimension,
                error = %e,
                "Embedding invariant violated"
            );
        })
    }

    fn dimensions(&self) -> usize {
        self.dimension
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Key hashed for a piece of content.
///
/// Text is lower-cased. Media gets an `IMAGE:` / `VIDEO:` prefix so a media
/// description never collides with the same words stored as text.
pub fn canonical_key(content: &str, content_type: ContentType) -> String {
    let lowered = content.to_lowercase();
    match content_type {
        ContentType::Text => lowered,
        ContentType::Image | ContentType::Video => format!("{}:{}", content_type.as_str(), lowered),
    }
}

/// First eight digest bytes as a big-endian integer.
fn seed_for(key: &str) -> u64 {
    let digest = Sha256::digest(key.as_bytes());
    digest
        .iter()
        .take(8)
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

/// Standard-normal sampler (Marsaglia polar method).
///
/// Each accepted pair yields two samples; the second is kept for the next call.
#[derive(Default)]
struct Gaussian {
    spare: Option<f64>,
}

impl Gaussian {
    fn sample<R: Rng>(&mut self, rng: &mut R) -> f64 {
        if let Some(spare) = self.spare.take() {
            return spare;
        }
        loop {
            let u = rng.random::<f64>() * 2.0 - 1.0;
            let v = rng.random::<f64>() * 2.0 - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let factor = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * factor);
                return u * factor;
            }
        }
    }
}

fn normalize(raw: &[f64]) -> Result<Vec<f32>> {
    let norm = raw.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return Err(VectraError::Embedding(format!(
            "cannot normalize vector of length {} with norm {}",
            raw.len(),
            norm
        )));
    }
    Ok(raw.iter().map(|x| (x / norm) as f32).collect())
}
