//! Cursor pagination over a remote query.
//!
//! A `PageState` turns one base query plus a page size into a sequence of
//! pages. Moving forward re-issues the base query with a cursor built from the
//! last document seen; moving backward only walks the pages already fetched.
//!
//! ## Example
//!
//! ```ignore
//! use devlibrary_data::{Direction, PageState, Query};
//!
//! let q = Query::new().order_by("stats.lastUpdated", Direction::Desc);
//! let mut pages = PageState::<BlogData>::new("products/firebase/blogs", q, 10)?;
//!
//! pages.advance(&client).await?;
//! for blog in pages.current().unwrap_or_default() { /* ... */ }
//!
//! if pages.has_next() {
//!     pages.advance(&client).await?;
//! }
//! pages.retreat();
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::document::Document;
use crate::error::DataError;
use crate::executor::QueryExecutor;
use crate::query::{field_path, Direction, OrderBy, Query, DOCUMENT_ID};

/// The state of one pagination session.
///
/// `pages` only grows. `current_page` is `None` until the first `advance`.
#[derive(Debug, Clone)]
pub struct PageState<T> {
    collection_path: String,
    query: Query,
    per_page: usize,
    pages: Vec<Vec<T>>,
    current_page: Option<usize>,
    has_next: bool,
    last_doc: Option<Document>,
}

impl<T: DeserializeOwned> PageState<T> {
    /// Start an empty session. `per_page` must be at least 1 and leave room
    /// for the look-ahead document.
    pub fn new(
        collection_path: impl Into<String>,
        query: Query,
        per_page: usize,
    ) -> Result<Self, DataError> {
        if per_page == 0 || per_page.checked_add(1).is_none() {
            return Err(DataError::InvalidPageSize(per_page));
        }
        Ok(Self {
            collection_path: collection_path.into(),
            query,
            per_page,
            pages: Vec::new(),
            current_page: None,
            has_next: false,
            last_doc: None,
        })
    }

    /// Fetch the page after the last fetched one and move onto it.
    ///
    /// Asks for one document more than `per_page`; its presence is what sets
    /// `has_next`. Errors leave the session untouched.
    ///
    /// The page index advances even when the fetch came back empty, so an
    /// empty collection ends up at page 0 with no pages.
    pub async fn advance<E>(&mut self, executor: &E) -> Result<(), DataError>
    where
        E: QueryExecutor + ?Sized,
    {
        let query = self.next_query();
        let result = executor.run_query(&self.collection_path, &query).await?;
        let mut docs = result.docs;

        let has_next = docs.len() > self.per_page;
        if has_next {
            docs.truncate(self.per_page);
        }

        let page = docs
            .iter()
            .map(|doc| serde_json::from_value::<T>(doc.data.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            collection = %self.collection_path,
            fetched = page.len(),
            has_next,
            "fetched page"
        );

        self.has_next = has_next;
        self.last_doc = docs.pop();
        if !page.is_empty() {
            self.pages.push(page);
        }
        self.current_page = Some(self.current_page.map_or(0, |index| index + 1));

        Ok(())
    }

    /// Move back one page, stopping at the first. Never touches the network.
    pub fn retreat(&mut self) {
        self.current_page = Some(self.current_page.map_or(0, |index| index.saturating_sub(1)));
    }

    /// The query the next `advance` will send.
    pub fn next_query(&self) -> Query {
        let mut query = self.query.clone();

        if let Some(last) = &self.last_doc {
            let mut cursor: Vec<Value> = query
                .order_by
                .iter()
                .map(|clause| {
                    field_path::lookup(&last.data, &clause.field_path)
                        .cloned()
                        .unwrap_or(Value::Null)
                })
                .collect();

            // Ties on the primary sort fields resolve by document id.
            query.order_by.push(OrderBy {
                field_path: DOCUMENT_ID.to_string(),
                direction: Direction::Desc,
            });
            cursor.push(Value::String(last.id.clone()));

            query.start_after = Some(cursor);
        }

        query.limit = Some(self.per_page + 1);
        query
    }
}

impl<T> PageState<T> {
    /// The page at `current_page`, if it has been fetched.
    pub fn current(&self) -> Option<&[T]> {
        self.current_page
            .and_then(|index| self.pages.get(index))
            .map(Vec::as_slice)
    }

    /// Index of the page being shown; `None` before the first fetch.
    ///
    /// After an empty first fetch this is `Some(0)` while `pages` is empty.
    pub fn current_page(&self) -> Option<usize> {
        self.current_page
    }

    pub fn pages(&self) -> &[Vec<T>] {
        &self.pages
    }

    /// Whether the last fetch saw a document beyond its page.
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_prev(&self) -> bool {
        self.current_page.is_some_and(|index| index > 0)
    }

    /// Last document of the most recently fetched page, raw.
    pub fn last_doc(&self) -> Option<&Document> {
        self.last_doc.as_ref()
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// The base query, exactly as given at construction.
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn collection_path(&self) -> &str {
        &self.collection_path
    }
}
