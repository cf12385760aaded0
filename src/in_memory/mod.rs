//! InMemoryStore - a document tree held in memory that answers document
//! fetches, structured queries and search.
//!
//! Paths are slash-separated (`products/firebase/repos/r1`); leading and
//! trailing slashes are ignored. Clone-friendly via Arc.

mod eval;

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::document::{Document, QueryResult};
use crate::error::DataError;
use crate::executor::{QueryExecutor, SearchProvider};
use crate::models::{SearchKind, SearchResult};
use crate::query::{field_path, Query};

const BLOG_SEARCH_FIELDS: &[&str] = &["metadata.title", "metadata.author"];
const REPO_SEARCH_FIELDS: &[&str] = &[
    "metadata.name",
    "metadata.shortDescription",
    "metadata.longDescription",
];
const AUTHOR_SEARCH_FIELDS: &[&str] = &["metadata.name"];

/// In-memory document store backed by a BTreeMap keyed by normalized path.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    documents: Arc<RwLock<BTreeMap<String, Value>>>,
}

fn normalize(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Split a document path into its parent collection path and its id.
fn split_path(path: &str) -> Option<(&str, &str)> {
    path.rsplit_once('/')
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the document at `path`.
    pub fn insert(&self, path: &str, data: Value) -> Result<(), DataError> {
        let key = normalize(path);
        if split_path(&key).is_none() {
            return Err(DataError::InvalidQuery(format!(
                "not a document path: {}",
                path
            )));
        }

        let mut documents = self
            .documents
            .write()
            .map_err(|_| DataError::LockPoisoned("insert"))?;
        documents.insert(key, data);
        Ok(())
    }

    /// Remove the document at `path`. Returns true if it existed.
    pub fn remove(&self, path: &str) -> Result<bool, DataError> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| DataError::LockPoisoned("remove"))?;
        Ok(documents.remove(&normalize(path)).is_some())
    }

    pub fn len(&self) -> Result<usize, DataError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| DataError::LockPoisoned("len"))?;
        Ok(documents.len())
    }

    pub fn is_empty(&self) -> Result<bool, DataError> {
        Ok(self.len()? == 0)
    }

    fn get(&self, path: &str) -> Result<Value, DataError> {
        let documents = self
            .documents
            .read()
            .map_err(|_| DataError::LockPoisoned("read"))?;
        documents
            .get(&normalize(path))
            .cloned()
            .ok_or_else(|| DataError::NotFound(path.to_string()))
    }

    fn query(&self, collection_path: &str, query: &Query) -> Result<QueryResult, DataError> {
        query.validate()?;

        let collection = normalize(collection_path);
        let documents = self
            .documents
            .read()
            .map_err(|_| DataError::LockPoisoned("query"))?;

        let mut docs: Vec<Document> = documents
            .iter()
            .filter_map(|(key, data)| {
                let (parent, id) = split_path(key)?;
                let in_scope = if query.is_collection_group() {
                    parent.rsplit('/').next() == Some(collection.as_str())
                } else {
                    parent == collection
                };
                in_scope.then(|| Document {
                    id: id.to_string(),
                    data: data.clone(),
                })
            })
            .filter(|doc| query.filters.iter().all(|clause| eval::matches(doc, clause)))
            // Ordering by a field excludes documents that lack it.
            .filter(|doc| {
                query
                    .order_by
                    .iter()
                    .all(|clause| eval::field_value(doc, &clause.field_path).is_some())
            })
            .collect();
        drop(documents);

        docs.sort_by(|a, b| eval::compare_docs(a, b, &query.order_by));

        if let Some(cursor) = &query.start_after {
            docs.retain(|doc| eval::is_after_cursor(doc, &query.order_by, cursor));
        }
        if let Some(limit) = query.limit {
            docs.truncate(limit);
        }

        debug!(collection = %collection, matched = docs.len(), "ran in-memory query");
        Ok(QueryResult { docs })
    }

    fn search_documents(&self, term: &str) -> Result<Vec<SearchResult>, DataError> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let documents = self
            .documents
            .read()
            .map_err(|_| DataError::LockPoisoned("search"))?;

        let mut results = Vec::new();
        for (key, data) in documents.iter() {
            let segments: Vec<&str> = key.split('/').collect();
            let (kind, product, title_path, fields) = match segments.as_slice() {
                ["products", product, "blogs", _] => (
                    SearchKind::Blog,
                    Some(product.to_string()),
                    "metadata.title",
                    BLOG_SEARCH_FIELDS,
                ),
                ["products", product, "repos", _] => (
                    SearchKind::Repo,
                    Some(product.to_string()),
                    "metadata.name",
                    REPO_SEARCH_FIELDS,
                ),
                ["authors", _] => (
                    SearchKind::Author,
                    None,
                    "metadata.name",
                    AUTHOR_SEARCH_FIELDS,
                ),
                _ => continue,
            };

            let hit = fields.iter().any(|path| {
                field_path::lookup(data, path)
                    .and_then(Value::as_str)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            });
            if !hit {
                continue;
            }

            let id = segments.last().copied().unwrap_or_default();
            let title = field_path::lookup(data, title_path)
                .and_then(Value::as_str)
                .unwrap_or(id);
            results.push(SearchResult {
                kind,
                id: id.to_string(),
                product,
                title: title.to_string(),
            });
        }

        Ok(results)
    }
}

#[async_trait]
impl QueryExecutor for InMemoryStore {
    async fn fetch_doc(&self, doc_path: &str) -> Result<Value, DataError> {
        self.get(doc_path)
    }

    async fn run_query(
        &self,
        collection_path: &str,
        query: &Query,
    ) -> Result<QueryResult, DataError> {
        self.query(collection_path, query)
    }
}

#[async_trait]
impl SearchProvider for InMemoryStore {
    async fn search(&self, term: &str) -> Result<Vec<SearchResult>, DataError> {
        self.search_documents(term)
    }
}
