//! Data access for a product blog/repo directory.
//!
//! Documents and queries go through a server-side proxy; `PageState` pages
//! through query results with cursors; `InMemoryStore` answers the same
//! requests from memory.

mod document;
mod error;
mod executor;
mod in_memory;
mod library;
pub mod models;
mod pagination;
pub mod proxy;
pub mod query;

pub use document::{Document, QueryResult, Record};
pub use error::DataError;
pub use executor::{QueryExecutor, SearchProvider};
pub use in_memory::InMemoryStore;
pub use library::{product_collection, AuthorProjects, DevLibrary};
pub use models::{
    AuthorData, AuthorMetadata, BlogData, BlogMetadata, BlogStats, RepoData, RepoLink,
    RepoMetadata, RepoPage, RepoPageRef, RepoStats, SearchKind, SearchResult,
};
pub use pagination::PageState;
pub use proxy::ProxyConfig;
pub use query::{Direction, Operator, OrderBy, Query, QueryScope, WhereClause, DOCUMENT_ID};

#[cfg(feature = "client")]
pub use proxy::ProxyClient;
