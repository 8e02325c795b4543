//! Vectra core crate - domain types, configuration and the shared error type.

pub mod config;
pub mod error;
pub mod types;

pub use config::VectraConfig;
pub use error::{Result, VectraError};
pub use types::*;
