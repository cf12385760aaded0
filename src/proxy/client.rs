//! HTTP client for the document, query and search proxies.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::config::ProxyConfig;
use super::{DOC_PROXY_ROUTE, QUERY_PROXY_ROUTE, SEARCH_ROUTE};
use crate::document::QueryResult;
use crate::error::DataError;
use crate::executor::{QueryExecutor, SearchProvider};
use crate::models::SearchResult;
use crate::query::Query;

/// Talks to the proxy endpoints of one hosting site.
///
/// Each call is a single GET; failures surface as `DataError` without retry.
#[derive(Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    config: ProxyConfig,
}

impl ProxyClient {
    pub fn new(config: ProxyConfig) -> Result<Self, DataError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    async fn get<T: DeserializeOwned>(
        &self,
        route: &str,
        params: &[(&str, &str)],
    ) -> Result<T, DataError> {
        let url = self.config.endpoint(route);
        debug!(%url, "proxy request");

        let response = self.client.get(&url).query(params).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = error_message(response.text().await.unwrap_or_default());
        warn!(%url, status = status.as_u16(), %message, "proxy request failed");

        if status == StatusCode::NOT_FOUND {
            let path = params
                .iter()
                .find(|(key, _)| *key == "path")
                .map(|(_, value)| value.to_string())
                .unwrap_or(message);
            return Err(DataError::NotFound(path));
        }
        Err(DataError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull the `error` field out of a JSON error body, or keep the raw text.
fn error_message(body: String) -> String {
    serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|value| value.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(body)
}

#[async_trait]
impl QueryExecutor for ProxyClient {
    async fn fetch_doc(&self, doc_path: &str) -> Result<Value, DataError> {
        self.get(DOC_PROXY_ROUTE, &[("path", doc_path)]).await
    }

    async fn run_query(
        &self,
        collection_path: &str,
        query: &Query,
    ) -> Result<QueryResult, DataError> {
        let encoded = query.encode()?;
        self.get(
            QUERY_PROXY_ROUTE,
            &[("path", collection_path), ("q", encoded.as_str())],
        )
        .await
    }
}

#[async_trait]
impl SearchProvider for ProxyClient {
    async fn search(&self, term: &str) -> Result<Vec<SearchResult>, DataError> {
        self.get(SEARCH_ROUTE, &[("q", term)]).await
    }
}
