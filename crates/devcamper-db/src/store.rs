use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use devcamper_core::query::CREATED_AT_FIELD;
use devcamper_core::serde::timestamp;
use devcamper_core::{Filter, SortKey};

use crate::error::StoreError;

/// A stored resource: a JSON object with an `id` and a `createdAt` field.
pub type Document = Map<String, Value>;

/// Fields the store owns; patches never overwrite them.
pub const RESERVED_FIELDS: [&str; 2] = ["id", CREATED_AT_FIELD];

/// One page of a filtered, ordered collection.
#[derive(Debug, Clone, Default)]
pub struct FindQuery {
    pub filter: Filter,
    pub sort: Vec<SortKey>,
    pub skip: u64,
    /// `None` returns every remaining document.
    pub limit: Option<u64>,
}

impl FindQuery {
    pub fn filtered(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }
}

/// Storage operations every resource service is written against.
///
/// Ordering: documents are ordered by `sort`, then by `id` so that equal sort
/// keys still produce a stable page sequence.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Document>, StoreError>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    async fn find_by_id(&self, collection: &str, id: Uuid) -> Result<Option<Document>, StoreError>;

    /// Inserts `doc`, filling in `id` and `createdAt` when absent.
    async fn insert(&self, collection: &str, doc: Document) -> Result<Document, StoreError>;

    /// Merges the top-level fields of `patch` into the document and returns
    /// the updated document, or `None` if no document has that id.
    async fn update_by_id(
        &self,
        collection: &str,
        id: Uuid,
        patch: Document,
    ) -> Result<Option<Document>, StoreError>;

    async fn delete_by_id(&self, collection: &str, id: Uuid)
        -> Result<Option<Document>, StoreError>;

    async fn delete_many(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let query = FindQuery {
            filter: filter.clone(),
            limit: Some(1),
            ..FindQuery::default()
        };
        Ok(self.find(collection, &query).await?.into_iter().next())
    }
}

/// Assigns `id` and `createdAt` to a new document and returns its id.
pub(crate) fn prepare_insert(doc: &mut Document) -> Result<Uuid, StoreError> {
    let id = match doc.get("id") {
        Some(Value::String(raw)) => Uuid::parse_str(raw)
            .map_err(|_| StoreError::InvalidDocument(format!("invalid id `{}`", raw)))?,
        Some(other) => {
            return Err(StoreError::InvalidDocument(format!("invalid id `{}`", other)));
        }
        None => Uuid::new_v4(),
    };
    doc.insert("id".to_string(), Value::String(id.to_string()));

    if !matches!(doc.get(CREATED_AT_FIELD), Some(Value::String(_))) {
        doc.insert(
            CREATED_AT_FIELD.to_string(),
            Value::String(timestamp::format(&Utc::now())),
        );
    }

    Ok(id)
}

/// Drops store-owned fields from an update patch.
pub(crate) fn strip_reserved(mut patch: Document) -> Document {
    for field in RESERVED_FIELDS {
        patch.remove(field);
    }
    patch
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prepare_insert_assigns_id_and_timestamp() {
        let mut doc = json!({"name": "ModernTech"}).as_object().cloned().unwrap();
        let id = prepare_insert(&mut doc).unwrap();

        assert_eq!(doc["id"], json!(id.to_string()));
        assert!(doc[CREATED_AT_FIELD].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_prepare_insert_keeps_given_id() {
        let given = Uuid::new_v4();
        let mut doc = json!({"id": given.to_string(), "createdAt": "2024-01-01T00:00:00.000Z"})
            .as_object()
            .cloned()
            .unwrap();

        assert_eq!(prepare_insert(&mut doc).unwrap(), given);
        assert_eq!(doc[CREATED_AT_FIELD], json!("2024-01-01T00:00:00.000Z"));
    }

    #[test]
    fn test_prepare_insert_rejects_bad_id() {
        let mut doc = json!({"id": "nope"}).as_object().cloned().unwrap();
        assert!(prepare_insert(&mut doc).is_err());
    }

    #[test]
    fn test_strip_reserved() {
        let patch = json!({"id": "x", "createdAt": "y", "name": "z"})
            .as_object()
            .cloned()
            .unwrap();
        let stripped = strip_reserved(patch);
        assert_eq!(stripped.len(), 1);
        assert!(stripped.contains_key("name"));
    }
}
