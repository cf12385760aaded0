use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::document::Record;

/// Metadata submitted for a blog post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogMetadata {
    /// Directory ids of the post's author(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_ids: Option<Vec<String>>,
    /// Name of the human author.
    pub author: String,
    pub title: String,
    /// Full external link to the post.
    pub link: String,
    /// Product-specific tags; the submission schema requires at least one.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogStats {
    #[serde(default)]
    pub last_updated: i64,
    #[serde(default)]
    pub date_added: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A blog post as stored under `products/{product}/blogs/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub product: String,
    pub metadata: BlogMetadata,
    #[serde(default)]
    pub stats: BlogStats,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for BlogData {
    const COLLECTION: &'static str = "blogs";
}
