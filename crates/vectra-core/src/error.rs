use thiserror::Error;

/// Top-level error type for the Vectra service.
///
/// Every layer below the pipeline returns this type. The pipeline folds it
/// into the structured store/search/health results, so callers of the public
/// operations never see it directly.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VectraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Search engine error: {0}")]
    Engine(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Search engine rejected request with HTTP {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VectraError {
    /// Short label for the error class, used in health check details.
    pub fn kind(&self) -> &'static str {
        match self {
            VectraError::Config(_) => "ConfigError",
            VectraError::Embedding(_) => "EmbeddingError",
            VectraError::Engine(_) => "EngineError",
            VectraError::Transport(_) => "TransportError",
            VectraError::Rejected { .. } => "RejectedError",
            VectraError::Parse(_) => "ParseError",
            VectraError::Api(_) => "ApiError",
            VectraError::Io(_) => "IoError",
            VectraError::Serialization(_) => "SerializationError",
        }
    }

    /// True for failures that are worth retrying later (engine down, timeout).
    pub fn is_transient(&self) -> bool {
        matches!(self, VectraError::Transport(_))
    }
}

impl From<toml::de::Error> for VectraError {
    fn from(err: toml::de::Error) -> Self {
        VectraError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VectraError {
    fn from(err: toml::ser::Error) -> Self {
        VectraError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VectraError {
    fn from(err: serde_json::Error) -> Self {
        VectraError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Vectra operations.
pub type Result<T> = std::result::Result<T, VectraError>;
