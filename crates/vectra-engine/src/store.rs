//! The document store trait and the content-type filter passed to queries.

use std::future::Future;
use std::pin::Pin;

use vectra_core::error::Result;
use vectra_core::types::{ContentType, EngineStatus, SearchResponse, VectorDocument};

/// Restriction on which content types a query may return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryFilter {
    /// `None` means every content type is eligible.
    pub content_type: Option<ContentType>,
}

impl QueryFilter {
    /// No type restriction.
    pub fn any() -> Self {
        Self { content_type: None }
    }

    /// Restrict to a single content type.
    pub fn only(content_type: ContentType) -> Self {
        Self {
            content_type: Some(content_type),
        }
    }

    /// Apply the default filtering policy.
    ///
    /// Including media disables the filter entirely. Otherwise results are
    /// restricted to the preferred type, or to TEXT when none is given.
    pub fn from_preferences(preferred: Option<ContentType>, include_media: bool) -> Self {
        if include_media {
            Self::any()
        } else {
            Self::only(preferred.unwrap_or(ContentType::Text))
        }
    }

    pub fn matches(&self, content_type: ContentType) -> bool {
        self.content_type.map_or(true, |ct| ct == content_type)
    }
}

/// Durable owner of vector documents.
///
/// Implementations report every failure (transport, rejection) as an `Err`
/// value and never panic; a malformed engine payload is an empty response,
/// not an error. `probe` cannot fail: unreachability is part of the status.
pub trait DocumentStore: Send + Sync {
    /// Persist a document. Success only on a 2xx engine response.
    fn write(&self, document: &VectorDocument) -> impl Future<Output = Result<()>> + Send;

    /// Nearest-neighbor query, hits in engine relevance order.
    fn query(
        &self,
        vector: &[f32],
        filter: &QueryFilter,
        limit: usize,
    ) -> impl Future<Output = Result<SearchResponse>> + Send;

    /// Remove a document by id.
    fn delete(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Connectivity and engine-reported state.
    fn probe(&self) -> impl Future<Output = EngineStatus> + Send;

    /// Label used in logs and health details.
    fn name(&self) -> &str;
}

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`DocumentStore`] for dynamic dispatch.
///
/// `DocumentStore` returns `impl Future` and so cannot be a trait object.
/// Every `DocumentStore` gets this trait through the blanket impl below, which
/// lets the pipeline hold an `Arc<dyn DynDocumentStore>`.
pub trait DynDocumentStore: Send + Sync {
    fn write_boxed<'a>(&'a self, document: &'a VectorDocument) -> BoxFuture<'a, Result<()>>;

    fn query_boxed<'a>(
        &'a self,
        vector: &'a [f32],
        filter: &'a QueryFilter,
        limit: usize,
    ) -> BoxFuture<'a, Result<SearchResponse>>;

    fn delete_boxed<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>>;

    fn probe_boxed(&self) -> BoxFuture<'_, EngineStatus>;

    fn name(&self) -> &str;
}

impl<T: DocumentStore> DynDocumentStore for T {
    fn write_boxed<'a>(&'a self, document: &'a VectorDocument) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.write(document))
    }

    fn query_boxed<'a>(
        &'a self,
        vector: &'a [f32],
        filter: &'a QueryFilter,
        limit: usize,
    ) -> BoxFuture<'a, Result<SearchResponse>> {
        Box::pin(self.query(vector, filter, limit))
    }

    fn delete_boxed<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.delete(id))
    }

    fn probe_boxed(&self) -> BoxFuture<'_, EngineStatus> {
        Box::pin(self.probe())
    }

    fn name(&self) -> &str {
        DocumentStore::name(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_text_only() {
        let filter = QueryFilter::from_preferences(None, false);
        assert_eq!(filter, QueryFilter::only(ContentType::Text));
    }

    #[test]
    fn test_preferred_type_without_media() {
        let filter = QueryFilter::from_preferences(Some(ContentType::Image), false);
        assert_eq!(filter.content_type, Some(ContentType::Image));
    }

    #[test]
    fn test_include_media_disables_filter() {
        assert_eq!(QueryFilter::from_preferences(None, true), QueryFilter::any());
        assert_eq!(
            QueryFilter::from_preferences(Some(ContentType::Video), true),
            QueryFilter::any()
        );
    }

    #[test]
    fn test_matches() {
        assert!(QueryFilter::any().matches(ContentType::Video));
        assert!(QueryFilter::only(ContentType::Text).matches(ContentType::Text));
        assert!(!QueryFilter::only(ContentType::Text).matches(ContentType::Image));
    }
}
