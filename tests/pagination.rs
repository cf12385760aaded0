//! Integration tests for cursor pagination (PageState).

mod support;

use std::sync::Mutex;

use async_trait::async_trait;
use devlibrary_data::{
    BlogData, DataError, Direction, Document, InMemoryStore, Operator, PageState, Query,
    QueryExecutor, QueryResult, DOCUMENT_ID,
};
use serde_json::{json, Value};

/// Serves a fixed, already-sorted list of documents. A cursor resumes after
/// the document whose id is the cursor's last value.
struct Scripted {
    docs: Vec<Document>,
    queries: Mutex<Vec<Query>>,
}

impl Scripted {
    fn new(ids: &[&str]) -> Self {
        Self {
            docs: ids
                .iter()
                .map(|id| Document {
                    id: id.to_string(),
                    data: json!({ "label": id.to_lowercase() }),
                })
                .collect(),
            queries: Mutex::new(Vec::new()),
        }
    }

    fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for Scripted {
    async fn fetch_doc(&self, doc_path: &str) -> Result<Value, DataError> {
        Err(DataError::NotFound(doc_path.to_string()))
    }

    async fn run_query(
        &self,
        _collection_path: &str,
        query: &Query,
    ) -> Result<QueryResult, DataError> {
        self.queries.lock().unwrap().push(query.clone());

        let skip = match query.start_after.as_ref().and_then(|c| c.last()) {
            Some(Value::String(after)) => self
                .docs
                .iter()
                .position(|d| &d.id == after)
                .map_or(0, |index| index + 1),
            _ => 0,
        };
        let docs = self
            .docs
            .iter()
            .skip(skip)
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(QueryResult { docs })
    }
}

fn labels(page: &[Value]) -> Vec<&str> {
    page.iter().map(|v| v["label"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn five_documents_two_per_page() {
    let executor = Scripted::new(&["A", "B", "C", "D", "E"]);
    let mut state = PageState::<Value>::new("/products/firebase/blogs", Query::new(), 2).unwrap();

    state.advance(&executor).await.unwrap();
    assert_eq!(labels(state.current().unwrap()), vec!["a", "b"]);
    assert!(state.has_next());
    assert_eq!(state.last_doc().unwrap().id, "B");

    state.advance(&executor).await.unwrap();
    assert_eq!(labels(state.current().unwrap()), vec!["c", "d"]);
    assert!(state.has_next());
    assert_eq!(state.last_doc().unwrap().id, "D");

    state.advance(&executor).await.unwrap();
    assert_eq!(labels(state.current().unwrap()), vec!["e"]);
    assert!(!state.has_next());
    assert_eq!(state.last_doc().unwrap().id, "E");
    assert_eq!(state.current_page(), Some(2));
    assert_eq!(state.pages().len(), 3);

    let queries = executor.queries();
    assert!(queries.iter().all(|q| q.limit == Some(3)));
    assert!(queries[0].start_after.is_none());
    assert_eq!(queries[1].start_after, Some(vec![json!("B")]));
    assert_eq!(queries[2].start_after, Some(vec![json!("D")]));
    assert_eq!(queries[2].order_by.len(), 1);
    assert_eq!(queries[2].order_by[0].field_path, DOCUMENT_ID);
}

#[tokio::test]
async fn empty_collection_moves_index_past_pages() {
    let executor = Scripted::new(&[]);
    let mut state = PageState::<Value>::new("/products/firebase/blogs", Query::new(), 2).unwrap();

    state.advance(&executor).await.unwrap();

    assert!(!state.has_next());
    assert!(state.pages().is_empty());
    assert_eq!(state.current_page(), Some(0));
    assert!(state.current().is_none());
    assert!(state.last_doc().is_none());
}

#[tokio::test]
async fn retreat_walks_cached_pages_without_queries() {
    let executor = Scripted::new(&["A", "B", "C", "D", "E"]);
    let mut state = PageState::<Value>::new("c", Query::new(), 2).unwrap();

    state.advance(&executor).await.unwrap();
    state.advance(&executor).await.unwrap();
    assert!(state.has_prev());

    state.retreat();
    assert_eq!(labels(state.current().unwrap()), vec!["a", "b"]);
    state.retreat();
    state.retreat();
    assert_eq!(state.current_page(), Some(0));
    assert_eq!(state.pages().len(), 2);
    assert_eq!(executor.queries().len(), 2);
}

#[tokio::test]
async fn base_query_is_never_mutated() {
    let executor = Scripted::new(&["A", "B", "C", "D", "E", "F", "G"]);
    let base = Query::new()
        .filter("metadata.tags", Operator::ArrayContains, "Auth")
        .order_by("stats.lastUpdated", Direction::Desc);
    let mut state = PageState::<Value>::new("c", base.clone(), 2).unwrap();

    for _ in 0..4 {
        state.advance(&executor).await.unwrap();
    }

    assert_eq!(state.query(), &base);
    assert_eq!(state.query().order_by.len(), 1);
    assert!(state.query().start_after.is_none());
    assert!(state.query().limit.is_none());

    // every follow-up query carries exactly one extra tie-break clause
    for q in executor.queries().iter().skip(1) {
        assert_eq!(q.order_by.len(), 2);
        assert_eq!(q.start_after.as_ref().unwrap().len(), 2);
    }
}

#[tokio::test]
async fn duplicate_sort_values_page_through_every_document_once() {
    let store = support::many_blogs(6);
    let query = Query::new().order_by("stats.lastUpdated", Direction::Desc);
    let mut state = PageState::<BlogData>::new("/products/firebase/blogs", query, 2).unwrap();

    let mut seen = Vec::new();
    loop {
        state.advance(&store).await.unwrap();
        if let Some(page) = state.current() {
            seen.extend(page.iter().map(|blog| blog.id.clone()));
        }
        if !state.has_next() {
            break;
        }
    }

    assert_eq!(
        seen,
        vec!["post-00", "post-05", "post-04", "post-03", "post-02", "post-01"]
    );
}

/// Page through `query` to the end, returning the ids of every page.
async fn collect_pages(store: &InMemoryStore, query: Query, per_page: usize) -> Vec<Vec<String>> {
    let mut state = PageState::<Value>::new("/products/firebase/blogs", query, per_page).unwrap();
    loop {
        state.advance(store).await.unwrap();
        if !state.has_next() {
            break;
        }
    }
    state
        .pages()
        .iter()
        .map(|page| {
            page.iter()
                .map(|doc| doc["id"].as_str().unwrap().to_string())
                .collect()
        })
        .collect()
}

#[tokio::test]
async fn tied_documents_page_once_each_in_the_store() {
    let store = InMemoryStore::new();
    for id in ["A", "B", "C", "D", "E"] {
        store
            .insert(
                &format!("/products/firebase/blogs/{}", id),
                json!({ "id": id, "t": 1 }),
            )
            .unwrap();
    }
    let expected = vec![
        vec!["E".to_string(), "D".to_string()],
        vec!["C".to_string(), "B".to_string()],
        vec!["A".to_string()],
    ];

    assert_eq!(collect_pages(&store, Query::new(), 2).await, expected);
    assert_eq!(
        collect_pages(&store, Query::new().order_by("t", Direction::Asc), 2).await,
        expected
    );
    assert_eq!(
        collect_pages(&store, Query::new().order_by("t", Direction::Desc), 2).await,
        expected
    );
}

#[tokio::test]
async fn ascending_order_with_ties_pages_in_order() {
    let store = InMemoryStore::new();
    for (id, t) in [("A", 2), ("B", 1), ("C", 2), ("D", 1), ("E", 3)] {
        store
            .insert(
                &format!("/products/firebase/blogs/{}", id),
                json!({ "id": id, "t": t }),
            )
            .unwrap();
    }

    let pages = collect_pages(&store, Query::new().order_by("t", Direction::Asc), 2).await;
    let seen: Vec<String> = pages.into_iter().flatten().collect();

    assert_eq!(seen, vec!["D", "B", "C", "A", "E"]);
}

#[tokio::test]
async fn same_cursor_gives_same_page() {
    let store = support::many_blogs(5);
    let query = Query::new().order_by("stats.lastUpdated", Direction::Desc);
    let mut state = PageState::<BlogData>::new("/products/firebase/blogs", query, 2).unwrap();
    state.advance(&store).await.unwrap();

    let next = state.next_query();
    let first = store.run_query("/products/firebase/blogs", &next).await.unwrap();
    let second = store.run_query("/products/firebase/blogs", &next).await.unwrap();

    let ids = |r: &QueryResult| r.docs.iter().map(|d| d.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(ids(&first), vec!["post-03", "post-02", "post-01"]);
}

#[tokio::test]
async fn executor_errors_propagate() {
    struct Down;

    #[async_trait]
    impl QueryExecutor for Down {
        async fn fetch_doc(&self, _doc_path: &str) -> Result<Value, DataError> {
            Err(DataError::Transport("connection refused".into()))
        }

        async fn run_query(
            &self,
            _collection_path: &str,
            _query: &Query,
        ) -> Result<QueryResult, DataError> {
            Err(DataError::Transport("connection refused".into()))
        }
    }

    let mut state = PageState::<Value>::new("c", Query::new(), 2).unwrap();
    let err = state.advance(&Down).await.unwrap_err();

    assert_eq!(err, DataError::Transport("connection refused".into()));
    assert_eq!(state.current_page(), None);
}
