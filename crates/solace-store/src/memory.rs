use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::Filter;
use crate::record::{Nested, RecordId, RecordStore};

/// How two collections relate, for resolving composite reads.
#[derive(Debug, Clone)]
enum Relation {
    /// A row of `from` holds `fk` pointing at the id of one `to` row; the
    /// embed is a single object.
    BelongsTo {
        from: String,
        fk: String,
        to: String,
    },
    /// Rows of `to` hold `fk` pointing back at the id of a `from` row; the
    /// embed is an array.
    HasMany {
        from: String,
        to: String,
        fk: String,
    },
}

/// In-process RecordStore holding JSON rows per collection.
///
/// Used by tests and local development. Relations must be declared up front
/// so composite reads can resolve embeds the way the REST backend would
/// from its foreign keys.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    relations: Vec<Relation>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `from` rows reference one `to` row via `fk`.
    pub fn belongs_to(mut self, from: &str, fk: &str, to: &str) -> Self {
        self.relations.push(Relation::BelongsTo {
            from: from.to_string(),
            fk: fk.to_string(),
            to: to.to_string(),
        });
        self
    }

    /// Declare that `to` rows reference back at `from` rows via `fk`.
    pub fn has_many(mut self, from: &str, to: &str, fk: &str) -> Self {
        self.relations.push(Relation::HasMany {
            from: from.to_string(),
            to: to.to_string(),
            fk: fk.to_string(),
        });
        self
    }

    /// Load rows into a collection.
    pub async fn seed(&self, collection: &str, rows: Vec<Value>) {
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .extend(rows);
    }

    fn embed(
        &self,
        collection: &str,
        row: &mut Value,
        nested: &[Nested],
        all: &HashMap<String, Vec<Value>>,
    ) -> Result<(), StoreError> {
        for spec in nested {
            let related = all
                .get(&spec.collection)
                .cloned()
                .unwrap_or_default();

            let relation = self
                .relations
                .iter()
                .find(|r| match r {
                    Relation::BelongsTo { from, to, .. } => {
                        from == collection && *to == spec.collection
                    }
                    Relation::HasMany { from, to, .. } => {
                        from == collection && *to == spec.collection
                    }
                })
                .ok_or_else(|| {
                    StoreError::Config(format!(
                        "no relation from {collection} to {}",
                        spec.collection
                    ))
                })?;

            let embedded = match relation {
                Relation::BelongsTo { fk, .. } => {
                    let key = row.get(fk.as_str()).cloned().unwrap_or(Value::Null);
                    let mut found = related
                        .into_iter()
                        .find(|candidate| candidate.get("id") == Some(&key))
                        .unwrap_or(Value::Null);
                    if !found.is_null() {
                        self.embed(&spec.collection, &mut found, &spec.children, all)?;
                        project(&mut found, &spec.columns);
                    }
                    found
                }
                Relation::HasMany { fk, .. } => {
                    let id = row.get("id").cloned().unwrap_or(Value::Null);
                    let mut rows = Vec::new();
                    for mut child in related {
                        if child.get(fk.as_str()) == Some(&id) {
                            self.embed(&spec.collection, &mut child, &spec.children, all)?;
                            project(&mut child, &spec.columns);
                            rows.push(child);
                        }
                    }
                    Value::Array(rows)
                }
            };

            if let Some(object) = row.as_object_mut() {
                object.insert(spec.collection.clone(), embedded);
            }
        }
        Ok(())
    }
}

fn project(row: &mut Value, columns: &[String]) {
    if columns.is_empty() {
        return;
    }
    if let Some(object) = row.as_object_mut() {
        let kept: Map<String, Value> = object
            .iter()
            .filter(|(key, _)| columns.contains(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        *object = kept;
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn fetch_one(&self, collection: &str, filter: &Filter) -> Result<Value, StoreError> {
        let collections = self.collections.lock().await;
        collections
            .get(collection)
            .and_then(|rows| rows.iter().find(|row| filter.matches(row)))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
            })
    }

    async fn fetch_all(
        &self,
        collection: &str,
        filter: &Filter,
        nested: &[Nested],
    ) -> Result<Vec<Value>, StoreError> {
        let collections = self.collections.lock().await;
        let matching: Vec<Value> = collections
            .get(collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| filter.matches(row))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        let mut out = Vec::with_capacity(matching.len());
        for mut row in matching {
            self.embed(collection, &mut row, nested, &collections)?;
            out.push(row);
        }
        Ok(out)
    }

    async fn fetch_composite(
        &self,
        collection: &str,
        filter: &Filter,
        nested: &[Nested],
    ) -> Result<Value, StoreError> {
        let collections = self.collections.lock().await;
        let mut row = collections
            .get(collection)
            .and_then(|rows| rows.iter().find(|row| filter.matches(row)))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
            })?;

        self.embed(collection, &mut row, nested, &collections)?;
        Ok(row)
    }

    async fn insert(&self, collection: &str, mut record: Value) -> Result<RecordId, StoreError> {
        let object = record.as_object_mut().ok_or_else(|| {
            StoreError::Write(format!("{collection}: record is not a JSON object"))
        })?;

        let id = match object.get("id") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => {
                let generated = Uuid::new_v4().to_string();
                object.insert("id".to_string(), Value::String(generated.clone()));
                generated
            }
        };

        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(record);

        Ok(RecordId(id))
    }

    async fn update(
        &self,
        collection: &str,
        filter: &Filter,
        patch: Value,
    ) -> Result<(), StoreError> {
        let patch = patch.as_object().cloned().ok_or_else(|| {
            StoreError::Write(format!("{collection}: patch is not a JSON object"))
        })?;

        let mut collections = self.collections.lock().await;
        if let Some(rows) = collections.get_mut(collection) {
            for row in rows.iter_mut().filter(|row| filter.matches(row)) {
                if let Some(object) = row.as_object_mut() {
                    for (key, value) in &patch {
                        object.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        Ok(())
    }
}
