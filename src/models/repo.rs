use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Record;

/// An additional documentation page of a repo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoPageRef {
    /// Display name, e.g. "Installation".
    pub name: String,
    /// Markdown path inside the repo, e.g. "docs/installing.md".
    pub path: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A link to an external project resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoLink {
    pub title: String,
    pub href: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Metadata submitted for a GitHub repo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_ids: Option<Vec<String>>,
    /// GitHub owner or organization.
    pub owner: String,
    /// GitHub repo name.
    pub repo: String,
    /// Display name.
    pub name: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub long_description: String,
    /// Main markdown file, e.g. "README.md".
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<RepoPageRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<RepoLink>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoStats {
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub last_updated: i64,
    #[serde(default)]
    pub date_added: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A repo as stored under `products/{product}/repos/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product: String,
    pub metadata: RepoMetadata,
    #[serde(default)]
    pub stats: RepoStats,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for RepoData {
    const COLLECTION: &'static str = "repos";
}

/// A rendered documentation page, stored under
/// `products/{product}/repos/{id}/pages/{key}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepoPage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    /// Rendered page content.
    #[serde(default)]
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
