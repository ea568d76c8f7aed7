use serde_json::Value;

/// A conjunction of column equality matches.
///
/// This is the only filter shape the portal needs: every read and write is
/// keyed by an id, a foreign key, or a status column.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.clauses.push((column.to_string(), value.into()));
        self
    }

    pub fn clauses(&self) -> &[(String, Value)] {
        &self.clauses
    }

    /// Whether a record satisfies every clause. Used by the in-memory
    /// backend; the REST backend compiles clauses into query parameters.
    pub fn matches(&self, record: &Value) -> bool {
        self.clauses
            .iter()
            .all(|(column, value)| record.get(column) == Some(value))
    }
}
