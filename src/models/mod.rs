//! Typed records stored in the directory.
//!
//! Stored records keep keys they do not know about in an `extra` map, so a
//! record fetched and re-serialized loses nothing.

mod author;
mod blog;
mod repo;
mod search;

pub use author::{AuthorData, AuthorMetadata};
pub use blog::{BlogData, BlogMetadata, BlogStats};
pub use repo::{RepoData, RepoLink, RepoMetadata, RepoPage, RepoPageRef, RepoStats};
pub use search::{SearchKind, SearchResult};
