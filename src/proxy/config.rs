use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Host the local hosting emulator serves the proxy on.
pub const LOCAL_API_HOST: &str = "http://localhost:5000";

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Where the proxy lives and how long to wait for it.
///
/// The base URL is always explicit; nothing is inferred from the process
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyConfig {
    /// Root of the hosting site, e.g. `https://devlibrary.example.com`.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl ProxyConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// The local hosting emulator.
    pub fn local() -> Self {
        Self::new(LOCAL_API_HOST)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Full URL of `route`, without a doubled slash.
    pub fn endpoint(&self, route: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), route)
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self::local()
    }
}
