use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreError;
use crate::filter::Filter;

/// Opaque identifier of a stored record, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordId(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A structured embed specification for composite reads.
///
/// Each node names a related collection to embed into the parent record,
/// optionally restricted to specific columns, with further nesting below.
/// The REST backend renders this into a `select=` expression; the in-memory
/// backend resolves it against declared relations.
#[derive(Debug, Clone)]
pub struct Nested {
    pub collection: String,
    /// Columns to include; empty means all.
    pub columns: Vec<String>,
    pub children: Vec<Nested>,
}

impl Nested {
    /// Embed all columns of `collection`.
    pub fn all(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            columns: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Embed only the named columns of `collection`.
    pub fn columns(collection: &str, columns: &[&str]) -> Self {
        Self {
            collection: collection.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: Nested) -> Self {
        self.children.push(child);
        self
    }

    /// Render this spec as a PostgREST select fragment, e.g.
    /// `custom_tests(*, custom_test_questions(*))`.
    pub fn to_select(&self) -> String {
        let mut inner: Vec<String> = if self.columns.is_empty() {
            vec!["*".to_string()]
        } else {
            self.columns.clone()
        };
        inner.extend(self.children.iter().map(Nested::to_select));
        format!("{}({})", self.collection, inner.join(", "))
    }
}

/// Generic key-based read/insert/update over named record collections.
///
/// Every operation is a single independent round trip; callers sequence
/// them and surface failures without retrying.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the first record matching `filter`.
    async fn fetch_one(&self, collection: &str, filter: &Filter) -> Result<Value, StoreError>;

    /// Fetch all records matching `filter`, with optional embeds.
    async fn fetch_all(
        &self,
        collection: &str,
        filter: &Filter,
        nested: &[Nested],
    ) -> Result<Vec<Value>, StoreError>;

    /// Fetch the first record matching `filter` together with its embedded
    /// relations.
    async fn fetch_composite(
        &self,
        collection: &str,
        filter: &Filter,
        nested: &[Nested],
    ) -> Result<Value, StoreError>;

    /// Insert a record, returning its id.
    async fn insert(&self, collection: &str, record: Value) -> Result<RecordId, StoreError>;

    /// Apply `patch` to every record matching `filter`.
    async fn update(&self, collection: &str, filter: &Filter, patch: Value)
        -> Result<(), StoreError>;
}
