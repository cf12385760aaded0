use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorMetadata {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(rename = "githubURL", default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(rename = "twitterURL", default, skip_serializing_if = "Option::is_none")]
    pub twitter_url: Option<String>,
    #[serde(rename = "mediumURL", default, skip_serializing_if = "Option::is_none")]
    pub medium_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An author profile, stored under `authors/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorData {
    #[serde(default)]
    pub id: String,
    pub metadata: AuthorMetadata,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
