//! Integration tests for the DevLibrary facade over the in-memory store.

mod support;

use devlibrary_data::{DataError, DevLibrary, Direction, Operator, Query, SearchKind};

#[tokio::test]
async fn fetch_author_and_repo() {
    let library = DevLibrary::new(support::directory());

    let author = library.fetch_author("sam").await.unwrap();
    assert_eq!(author.metadata.name, "Sam Rivera");

    let repo = library.fetch_repo("android", "r2").await.unwrap();
    assert_eq!(repo.metadata.name, "widget-lab");
    assert_eq!(repo.stats.stars, 12);
    assert_eq!(repo.metadata.pages.unwrap()[0].name, "Install");
}

#[tokio::test]
async fn fetch_repo_page() {
    let library = DevLibrary::new(support::directory());

    let page = library.fetch_repo_page("android", "r2", "install").await.unwrap();
    assert_eq!(page.path, "docs/install.md");
    assert_eq!(page.content, "<h1>Install</h1>");
}

#[tokio::test]
async fn missing_document_is_not_found() {
    let library = DevLibrary::new(support::directory());

    let err = library.fetch_repo("android", "nope").await.unwrap_err();
    assert_eq!(err, DataError::NotFound("/products/android/repos/nope".into()));
}

#[tokio::test]
async fn query_blogs_for_one_product() {
    let library = DevLibrary::new(support::directory());

    let q = Query::new().order_by("stats.lastUpdated", Direction::Desc);
    let result = library.query_blogs("firebase", &q).await.unwrap();

    let titles: Vec<_> = result
        .docs
        .iter()
        .map(|d| d.data.metadata.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Offline first apps", "Realtime chat in an hour", "Security rules by example"]
    );
}

#[tokio::test]
async fn query_repos_with_filter() {
    let library = DevLibrary::new(support::directory());

    let q = Query::new().filter("stats.stars", Operator::GreaterThan, 20);
    let firebase = library.query_repos("firebase", &q).await.unwrap();
    let android = library.query_repos("android", &q).await.unwrap();

    assert_eq!(firebase.docs.len(), 1);
    assert_eq!(firebase.docs[0].id, "r1");
    assert!(android.docs.is_empty());
}

#[tokio::test]
async fn author_projects_span_products() {
    let library = DevLibrary::new(support::directory());

    let projects = library.query_author_projects("sam").await.unwrap();

    let blog_ids: Vec<_> = projects.blogs.docs.iter().map(|d| d.id.as_str()).collect();
    let repo_ids: Vec<_> = projects.repos.docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(blog_ids, vec!["b1", "b4", "b3"]);
    assert_eq!(repo_ids, vec!["r2"]);
}

#[tokio::test]
async fn search_finds_blogs_repos_and_authors() {
    let library = DevLibrary::new(support::directory());

    let results = library.search("chat").await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().any(|r| r.kind == SearchKind::Blog && r.id == "b2"));
    assert!(results.iter().any(|r| r.kind == SearchKind::Repo && r.id == "r1"));

    let authors = library.search("rivera").await.unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].kind, SearchKind::Author);
    assert_eq!(authors[0].title, "Sam Rivera");
}

#[tokio::test]
async fn blog_pages_through_library() {
    let library = DevLibrary::new(support::directory());
    let q = Query::new().order_by("stats.lastUpdated", Direction::Desc);
    let mut pages = library.blog_pages("firebase", q, 2).unwrap();
    assert_eq!(pages.collection_path(), "/products/firebase/blogs");

    library.next_page(&mut pages).await.unwrap();
    assert_eq!(pages.current().unwrap().len(), 2);
    assert!(pages.has_next());

    library.next_page(&mut pages).await.unwrap();
    let last = pages.current().unwrap();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].id, "b3");
    assert!(!pages.has_next());

    pages.retreat();
    assert_eq!(pages.current().unwrap()[0].id, "b1");
}

#[test]
fn zero_sized_pages_are_rejected() {
    let library = DevLibrary::new(support::directory());
    assert!(matches!(
        library.repo_pages("android", Query::new(), 0),
        Err(DataError::InvalidPageSize(0))
    ));
}
