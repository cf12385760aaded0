//! The HTTP boundary between the browser-side data layer and the
//! document database.
//!
//! ## Routes
//!
//! - `GET /api/docProxy?path=<doc path>`: document data as JSON.
//! - `GET /api/queryProxy?path=<collection path>&q=<base64 query>`:
//!   `{ "docs": [{ "id", "data" }] }`.
//! - `GET /api/elasticSearch?q=<term>`: a list of search results.
//!
//! Failures answer with `{ "error": message }` and a status from
//! `DataError::status_code`.
//!
//! The client half requires the `client` feature; the server half requires
//! the `server` feature.

mod config;

pub use config::ProxyConfig;

#[cfg(feature = "client")]
mod client;
#[cfg(feature = "client")]
pub use client::ProxyClient;

#[cfg(feature = "server")]
mod server;
#[cfg(feature = "server")]
pub use server::{router, serve};

/// Route of the single-document proxy.
pub const DOC_PROXY_ROUTE: &str = "/api/docProxy";
/// Route of the structured query proxy.
pub const QUERY_PROXY_ROUTE: &str = "/api/queryProxy";
/// Route of the search proxy.
pub const SEARCH_ROUTE: &str = "/api/elasticSearch";
