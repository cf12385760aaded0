//! Server half of the proxy. Exposes any executor over the proxy routes.
//!
//! Requires the `server` feature. Uses axum for routing.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use devlibrary_data::{proxy, InMemoryStore};
//!
//! let store = Arc::new(InMemoryStore::new());
//!
//! // Get the router to compose with other axum routes
//! let app = proxy::router(store.clone());
//!
//! // Or serve directly
//! proxy::serve(store, "0.0.0.0:5000").await?;
//! ```

use std::sync::Arc;

use axum::extract::{Query as Params, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{DOC_PROXY_ROUTE, QUERY_PROXY_ROUTE, SEARCH_ROUTE};
use crate::error::DataError;
use crate::executor::{QueryExecutor, SearchProvider};
use crate::query::Query;

#[derive(Deserialize)]
struct DocParams {
    path: String,
}

#[derive(Deserialize)]
struct QueryParams {
    path: String,
    q: String,
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// Build an axum `Router` serving the proxy routes from `backend`.
pub fn router<S>(backend: Arc<S>) -> Router
where
    S: QueryExecutor + SearchProvider + 'static,
{
    Router::new()
        .route("/health", get(health_handler))
        .route(DOC_PROXY_ROUTE, get(doc_handler::<S>))
        .route(QUERY_PROXY_ROUTE, get(query_handler::<S>))
        .route(SEARCH_ROUTE, get(search_handler::<S>))
        .with_state(backend)
}

/// Serve the proxy over HTTP at the given address (e.g. `"0.0.0.0:5000"`).
pub async fn serve<S>(backend: Arc<S>, addr: &str) -> Result<(), std::io::Error>
where
    S: QueryExecutor + SearchProvider + 'static,
{
    let app = router(backend);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// `GET /health`: returns `{ "ok": true }`.
async fn health_handler() -> impl IntoResponse {
    Json(json!({ "ok": true }))
}

/// `GET /api/docProxy?path=`: the document's data.
async fn doc_handler<S>(State(backend): State<Arc<S>>, Params(params): Params<DocParams>) -> Response
where
    S: QueryExecutor + SearchProvider + 'static,
{
    debug!(path = %params.path, "doc proxy");
    match backend.fetch_doc(&params.path).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /api/queryProxy?path=&q=`: decode the query and run it.
async fn query_handler<S>(
    State(backend): State<Arc<S>>,
    Params(params): Params<QueryParams>,
) -> Response
where
    S: QueryExecutor + SearchProvider + 'static,
{
    let query = match Query::decode(&params.q) {
        Ok(query) => query,
        Err(e) => return error_response(e),
    };
    debug!(path = %params.path, ?query, "query proxy");

    match backend.run_query(&params.path, &query).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => error_response(e),
    }
}

/// `GET /api/elasticSearch?q=`: search results for the term.
async fn search_handler<S>(
    State(backend): State<Arc<S>>,
    Params(params): Params<SearchParams>,
) -> Response
where
    S: QueryExecutor + SearchProvider + 'static,
{
    match backend.search(&params.q).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(err: DataError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        warn!(error = %err, "proxy request failed");
    }
    let body = json!({ "error": err.to_string() });
    (status, Json(body)).into_response()
}
