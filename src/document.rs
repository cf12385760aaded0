use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::error::DataError;

/// A document as returned by the query proxy: its id and its field data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T = Value> {
    pub id: String,
    pub data: T,
}

impl Document<Value> {
    /// Deserialize the document data into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<Document<T>, DataError> {
        Ok(Document {
            id: self.id.clone(),
            data: serde_json::from_value(self.data.clone())?,
        })
    }
}

/// The body of a query proxy response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult<T = Value> {
    #[serde(default = "Vec::new")]
    pub docs: Vec<Document<T>>,
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self { docs: Vec::new() }
    }
}

impl QueryResult<Value> {
    /// Deserialize every document into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<QueryResult<T>, DataError> {
        let docs = self
            .docs
            .iter()
            .map(Document::decode)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(QueryResult { docs })
    }
}

/// A typed record stored in a named collection under each product.
pub trait Record: DeserializeOwned + Send {
    /// The collection id (e.g. "blogs", "repos").
    const COLLECTION: &'static str;
}
