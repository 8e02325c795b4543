//! Vectra engine crate - the persistence seam and its implementations.
//!
//! `DocumentStore` is the only way the rest of the service reaches stored
//! documents. `VespaStore` talks to the external tensor-search engine over
//! HTTP; `MemoryStore` keeps documents in-process for tests and local runs.

pub mod memory;
pub mod query;
pub mod response;
pub mod store;
pub mod vespa;

pub use memory::MemoryStore;
pub use query::{build_yql, tensor_literal};
pub use response::parse_search_response;
pub use store::{DocumentStore, DynDocumentStore, QueryFilter};
pub use vespa::VespaStore;
