//! Shared fixture: a small directory of authors, blogs and repos.

#![allow(dead_code)]

use devlibrary_data::InMemoryStore;
use serde_json::{json, Value};

fn blog(id: &str, product: &str, title: &str, authors: &[&str], last_updated: i64) -> Value {
    json!({
        "id": id,
        "product": product,
        "metadata": {
            "authorIds": authors,
            "author": "Someone",
            "title": title,
            "link": format!("https://blog.example.com/{}", id),
            "tags": ["General"]
        },
        "stats": { "lastUpdated": last_updated, "dateAdded": 1 }
    })
}

fn repo(id: &str, product: &str, name: &str, authors: &[&str], stars: u64, last_updated: i64) -> Value {
    json!({
        "id": id,
        "product": product,
        "metadata": {
            "authorIds": authors,
            "owner": "octo",
            "repo": id,
            "name": name,
            "shortDescription": format!("{} in one line", name),
            "longDescription": format!("{} in a few more lines", name),
            "content": "README.md",
            "tags": ["Tools"],
            "pages": [{ "name": "Install", "path": "docs/install.md" }]
        },
        "stats": { "stars": stars, "forks": 0, "lastUpdated": last_updated, "dateAdded": 1 }
    })
}

/// Seed a store with two products, three authors and a repo page.
pub fn directory() -> InMemoryStore {
    let store = InMemoryStore::new();
    let docs = [
        (
            "/authors/sam",
            json!({ "id": "sam", "metadata": { "name": "Sam Rivera", "bio": "Builds things" } }),
        ),
        (
            "/authors/kim",
            json!({ "id": "kim", "metadata": { "name": "Kim Lee", "bio": "" } }),
        ),
        (
            "/products/firebase/blogs/b1",
            blog("b1", "firebase", "Offline first apps", &["sam"], 30),
        ),
        (
            "/products/firebase/blogs/b2",
            blog("b2", "firebase", "Realtime chat in an hour", &["kim"], 20),
        ),
        (
            "/products/firebase/blogs/b3",
            blog("b3", "firebase", "Security rules by example", &["sam", "kim"], 10),
        ),
        (
            "/products/android/blogs/b4",
            blog("b4", "android", "Compose animations", &["sam"], 25),
        ),
        (
            "/products/firebase/repos/r1",
            repo("r1", "firebase", "chat-kit", &["kim"], 40, 50),
        ),
        (
            "/products/android/repos/r2",
            repo("r2", "android", "widget-lab", &["sam"], 12, 40),
        ),
        (
            "/products/android/repos/r2/pages/install",
            json!({ "name": "Install", "path": "docs/install.md", "content": "<h1>Install</h1>" }),
        ),
    ];
    for (path, data) in docs {
        store.insert(path, data).unwrap();
    }
    store
}

/// Seed a store with `count` blogs under one product, all sharing the same
/// `stats.lastUpdated` except the first.
pub fn many_blogs(count: usize) -> InMemoryStore {
    let store = InMemoryStore::new();
    for i in 0..count {
        let id = format!("post-{:02}", i);
        let last_updated = if i == 0 { 100 } else { 50 };
        store
            .insert(
                &format!("/products/firebase/blogs/{}", id),
                blog(&id, "firebase", &format!("Post {}", i), &["sam"], last_updated),
            )
            .unwrap();
    }
    store
}
