//! DevLibrary - typed access to authors, blogs, repos and search.
//!
//! ## Example
//!
//! ```ignore
//! use devlibrary_data::{DevLibrary, ProxyClient, ProxyConfig, Query};
//!
//! let library = DevLibrary::new(ProxyClient::new(ProxyConfig::local())?);
//!
//! let repo = library.fetch_repo("firebase", "octo-widgets").await?;
//! let mut pages = library.repo_pages("firebase", Query::new(), 10)?;
//! library.next_page(&mut pages).await?;
//! ```

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::document::{QueryResult, Record};
use crate::error::DataError;
use crate::executor::{QueryExecutor, SearchProvider};
use crate::models::{AuthorData, BlogData, RepoData, RepoPage, SearchResult};
use crate::pagination::PageState;
use crate::query::{Direction, Operator, Query};

/// Blogs and repos written by one author, most recently updated first.
#[derive(Debug, Clone, Default)]
pub struct AuthorProjects {
    pub blogs: QueryResult<BlogData>,
    pub repos: QueryResult<RepoData>,
}

/// Path of the collection holding records of type `M` for a product.
pub fn product_collection<M: Record>(product: &str) -> String {
    format!("/products/{}/{}", product, M::COLLECTION)
}

/// Typed facade over a query executor.
pub struct DevLibrary<E> {
    executor: E,
}

impl<E: QueryExecutor> DevLibrary<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Get a reference to the executor.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    async fn fetch<T: DeserializeOwned>(&self, doc_path: &str) -> Result<T, DataError> {
        debug!(path = doc_path, "fetching document");
        let data: Value = self.executor.fetch_doc(doc_path).await?;
        Ok(serde_json::from_value(data)?)
    }

    pub async fn fetch_author(&self, id: &str) -> Result<AuthorData, DataError> {
        self.fetch(&format!("/authors/{}", id)).await
    }

    pub async fn fetch_repo(&self, product: &str, id: &str) -> Result<RepoData, DataError> {
        self.fetch(&format!("/products/{}/repos/{}", product, id))
            .await
    }

    /// Fetch one of a repo's additional documentation pages.
    pub async fn fetch_repo_page(
        &self,
        product: &str,
        id: &str,
        page_key: &str,
    ) -> Result<RepoPage, DataError> {
        self.fetch(&format!(
            "/products/{}/repos/{}/pages/{}",
            product, id, page_key
        ))
        .await
    }

    /// Run `query` against a product's collection of `M` records.
    pub async fn query_product<M: Record>(
        &self,
        product: &str,
        query: &Query,
    ) -> Result<QueryResult<M>, DataError> {
        let result = self
            .executor
            .run_query(&product_collection::<M>(product), query)
            .await?;
        result.decode()
    }

    pub async fn query_blogs(
        &self,
        product: &str,
        query: &Query,
    ) -> Result<QueryResult<BlogData>, DataError> {
        self.query_product(product, query).await
    }

    pub async fn query_repos(
        &self,
        product: &str,
        query: &Query,
    ) -> Result<QueryResult<RepoData>, DataError> {
        self.query_product(product, query).await
    }

    /// Every blog and repo, across products, that lists `author_id` among
    /// its authors.
    pub async fn query_author_projects(&self, author_id: &str) -> Result<AuthorProjects, DataError> {
        let query = author_projects_query(author_id);

        let blogs = self
            .executor
            .run_query(BlogData::COLLECTION, &query)
            .await?
            .decode()?;
        let repos = self
            .executor
            .run_query(RepoData::COLLECTION, &query)
            .await?
            .decode()?;

        Ok(AuthorProjects { blogs, repos })
    }

    /// Start a pagination session over a product's blogs.
    pub fn blog_pages(
        &self,
        product: &str,
        query: Query,
        per_page: usize,
    ) -> Result<PageState<BlogData>, DataError> {
        PageState::new(product_collection::<BlogData>(product), query, per_page)
    }

    /// Start a pagination session over a product's repos.
    pub fn repo_pages(
        &self,
        product: &str,
        query: Query,
        per_page: usize,
    ) -> Result<PageState<RepoData>, DataError> {
        PageState::new(product_collection::<RepoData>(product), query, per_page)
    }

    /// Advance `pages` through this library's executor.
    pub async fn next_page<T: DeserializeOwned>(
        &self,
        pages: &mut PageState<T>,
    ) -> Result<(), DataError> {
        pages.advance(&self.executor).await
    }
}

impl<E: QueryExecutor + SearchProvider> DevLibrary<E> {
    pub async fn search(&self, term: &str) -> Result<Vec<SearchResult>, DataError> {
        self.executor.search(term).await
    }
}

fn author_projects_query(author_id: &str) -> Query {
    Query::collection_group()
        .filter("metadata.authorIds", Operator::ArrayContains, author_id)
        .order_by("stats.lastUpdated", Direction::Desc)
}
