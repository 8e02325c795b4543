//! Vectra API crate - axum HTTP server exposing store, search, sample loading
//! and health endpoints under `/api/v1`.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
