//! Boundary traits between the data layer and whatever answers its requests.

use async_trait::async_trait;
use serde_json::Value;

use crate::document::QueryResult;
use crate::error::DataError;
use crate::models::SearchResult;
use crate::query::Query;

/// Runs document fetches and structured queries.
///
/// Implementations make exactly one attempt per call; timeouts belong to the
/// implementation, retries belong nowhere.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Fetch the data of the document at `doc_path`.
    async fn fetch_doc(&self, doc_path: &str) -> Result<Value, DataError>;

    /// Run `query` against the collection (or collection group) at
    /// `collection_path`, returning documents in the query's sort order.
    async fn run_query(
        &self,
        collection_path: &str,
        query: &Query,
    ) -> Result<QueryResult, DataError>;
}

/// Free-text search across the directory.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, term: &str) -> Result<Vec<SearchResult>, DataError>;
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for std::sync::Arc<E> {
    async fn fetch_doc(&self, doc_path: &str) -> Result<Value, DataError> {
        (**self).fetch_doc(doc_path).await
    }

    async fn run_query(
        &self,
        collection_path: &str,
        query: &Query,
    ) -> Result<QueryResult, DataError> {
        (**self).run_query(collection_path, query).await
    }
}

#[async_trait]
impl<S: SearchProvider + ?Sized> SearchProvider for std::sync::Arc<S> {
    async fn search(&self, term: &str) -> Result<Vec<SearchResult>, DataError> {
        (**self).search(term).await
    }
}
