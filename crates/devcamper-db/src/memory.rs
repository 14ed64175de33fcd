//! In-memory implementation of [`DocumentStore`] for tests and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use devcamper_core::Filter;

use crate::error::StoreError;
use crate::matching::{compare_documents, matches};
use crate::store::{Document, DocumentStore, FindQuery, prepare_insert, strip_reserved};

/// Collections held in process memory.
///
/// Cloning shares the underlying collections.
#[derive(Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
    unique: Vec<UniqueKey>,
}

#[derive(Clone, Debug)]
struct UniqueKey {
    collection: String,
    fields: Vec<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes that would give two documents of `collection` the same
    /// `field` value.
    pub fn with_unique(self, collection: &str, field: &str) -> Self {
        self.with_unique_fields(collection, &[field])
    }

    /// Rejects writes that would give two documents of `collection` the same
    /// combination of `fields` values.
    pub fn with_unique_fields(mut self, collection: &str, fields: &[&str]) -> Self {
        self.unique.push(UniqueKey {
            collection: collection.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    fn check_unique(
        &self,
        collection: &str,
        existing: &[Document],
        candidate: &Document,
    ) -> Result<(), StoreError> {
        let candidate_id = candidate.get("id");

        for key in self.unique.iter().filter(|k| k.collection == collection) {
            let values: Option<Vec<&Value>> = key
                .fields
                .iter()
                .map(|field| candidate.get(field).filter(|v| !v.is_null()))
                .collect();
            let Some(values) = values else {
                continue;
            };

            let taken = existing.iter().any(|doc| {
                doc.get("id") != candidate_id
                    && key
                        .fields
                        .iter()
                        .zip(&values)
                        .all(|(field, value)| doc.get(field) == Some(*value))
            });
            if taken {
                return Err(StoreError::Duplicate {
                    collection: collection.to_string(),
                    field: key.fields.join(","),
                });
            }
        }

        Ok(())
    }
}

fn id_matches(doc: &Document, id: Uuid) -> bool {
    matches!(doc.get("id"), Some(Value::String(raw)) if Uuid::parse_str(raw).is_ok_and(|v| v == id))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let mut found: Vec<Document> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| matches(doc, &query.filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        found.sort_by(|a, b| compare_documents(a, b, &query.sort));

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(found.into_iter().skip(skip).take(limit).collect())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|doc| matches(doc, filter)).count() as u64)
            .unwrap_or(0))
    }

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| id_matches(doc, id)))
            .cloned())
    }

    async fn insert(&self, collection: &str, mut doc: Document) -> Result<Document, StoreError> {
        prepare_insert(&mut doc)?;

        let mut collections = self
            .collections
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        let docs = collections.entry(collection.to_string()).or_default();

        if docs.iter().any(|existing| existing.get("id") == doc.get("id")) {
            return Err(StoreError::Duplicate {
                collection: collection.to_string(),
                field: "id".to_string(),
            });
        }
        self.check_unique(collection, docs, &doc)?;

        docs.push(doc.clone());
        Ok(doc)
    }

    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        patch: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(None);
        };
        let Some(index) = docs.iter().position(|doc| id_matches(doc, id)) else {
            return Ok(None);
        };

        let mut updated = docs[index].clone();
        updated.extend(strip_reserved(patch));
        self.check_unique(collection, docs, &updated)?;

        docs[index] = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_by_id(
        &self,
        collection: &str,
        id: Uuid,
    ) -> Result<Option<Document>, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        Ok(collections.get_mut(collection).and_then(|docs| {
            docs.iter()
                .position(|doc| id_matches(doc, id))
                .map(|index| docs.remove(index))
        }))
    }

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut collections = self
            .collections
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))?;

        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|doc| !matches(doc, filter));
        Ok((before - docs.len()) as u64)
    }
}
