use serde::{Deserialize, Serialize};

/// What kind of record a search hit points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Blog,
    Repo,
    Author,
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: SearchKind,
    pub id: String,
    /// Owning product; absent for authors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    pub title: String,
}
