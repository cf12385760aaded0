//! Query - the structured query descriptor sent through the query proxy.
//!
//! A `Query` mirrors the document database's structured query: filters,
//! sort order, a limit and an optional cursor. It travels to the proxy as the
//! base64 encoding of its JSON form.
//!
//! ## Example
//!
//! ```ignore
//! use devlibrary_data::{Direction, Operator, Query};
//!
//! let q = Query::new()
//!     .filter("metadata.tags", Operator::ArrayContains, "firebase")
//!     .order_by("stats.lastUpdated", Direction::Desc)
//!     .limit(10);
//!
//! let param = q.encode()?;
//! assert_eq!(Query::decode(&param)?, q);
//! ```

pub mod field_path;

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DataError;

/// Field path that designates the document identifier.
pub const DOCUMENT_ID: &str = "__name__";

/// Which collections a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryScope {
    /// Only the collection at the given path.
    Collection,
    /// Every collection with the given id, wherever it is nested.
    CollectionGroup,
}

/// Comparison operator of a `where` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "array-contains")]
    ArrayContains,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "array-contains-any")]
    ArrayContainsAny,
    #[serde(rename = "not-in")]
    NotIn,
}

/// Sort direction of an `orderBy` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// A single filter predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhereClause {
    pub field_path: String,
    pub operator: Operator,
    pub value: Value,
}

/// A single sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBy {
    pub field_path: String,
    #[serde(default)]
    pub direction: Direction,
}

/// A filterable, sortable query over a document collection.
///
/// `Clone` is a structural copy of every nested list, so a clone can be
/// extended with cursor clauses without touching the original.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<QueryScope>,
    #[serde(default, rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<WhereClause>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_after: Option<Vec<Value>>,
}

impl Query {
    /// An unfiltered, unordered query over a single collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty query over every collection sharing an id.
    pub fn collection_group() -> Self {
        Self {
            scope: Some(QueryScope::CollectionGroup),
            ..Self::default()
        }
    }

    /// Add a `where` clause.
    pub fn filter(
        mut self,
        field_path: impl Into<String>,
        operator: Operator,
        value: impl Into<Value>,
    ) -> Self {
        self.filters.push(WhereClause {
            field_path: field_path.into(),
            operator,
            value: value.into(),
        });
        self
    }

    /// Append a sort key.
    pub fn order_by(mut self, field_path: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push(OrderBy {
            field_path: field_path.into(),
            direction,
        });
        self
    }

    /// Cap the number of returned documents.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resume strictly after the document described by `cursor`.
    pub fn start_after(mut self, cursor: Vec<Value>) -> Self {
        self.start_after = Some(cursor);
        self
    }

    /// Whether the query spans a collection group.
    pub fn is_collection_group(&self) -> bool {
        self.scope == Some(QueryScope::CollectionGroup)
    }

    /// Check the structural invariants of the query.
    pub fn validate(&self) -> Result<(), DataError> {
        if let Some(cursor) = &self.start_after {
            if cursor.len() != self.order_by.len() {
                return Err(DataError::InvalidQuery(format!(
                    "startAfter has {} values but orderBy has {} clauses",
                    cursor.len(),
                    self.order_by.len()
                )));
            }
        }
        Ok(())
    }

    /// Encode the query as the `q` transport parameter.
    pub fn encode(&self) -> Result<String, DataError> {
        let json = serde_json::to_vec(self).map_err(|e| DataError::Encode(e.to_string()))?;
        Ok(STANDARD.encode(json))
    }

    /// Decode a `q` transport parameter.
    pub fn decode(param: &str) -> Result<Self, DataError> {
        let json = STANDARD
            .decode(param)
            .map_err(|e| DataError::InvalidQuery(format!("bad query encoding: {}", e)))?;
        serde_json::from_slice(&json)
            .map_err(|e| DataError::InvalidQuery(format!("bad query json: {}", e)))
    }
}
