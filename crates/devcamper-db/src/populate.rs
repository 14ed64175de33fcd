//! Relation expansion for listing and detail responses.
//!
//! A relation replaces an id reference with the referenced document
//! ([`Relation::BelongsTo`]) or attaches the documents that reference this one
//! ([`Relation::HasMany`]). Expansion runs one batched query per call,
//! whatever the number of documents.

use std::collections::HashMap;

use serde_json::Value;

use devcamper_core::query::CREATED_AT_FIELD;
use devcamper_core::{FieldPath, Filter, Operand, Predicate, Projection, SortKey};

use crate::error::StoreError;
use crate::store::{Document, DocumentStore, FindQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `field` holds the id of a document in `collection`.
    BelongsTo {
        field: &'static str,
        collection: &'static str,
        /// Fields kept from the referenced document; `None` keeps them all.
        select: Option<&'static str>,
    },
    /// Documents of `collection` whose `foreign_field` holds this document's
    /// id, attached as an array under `field`.
    HasMany {
        field: &'static str,
        collection: &'static str,
        foreign_field: &'static str,
    },
}

fn string_ids<'a>(docs: impl Iterator<Item = &'a Value>) -> Vec<String> {
    let mut ids: Vec<String> = docs
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();
    ids.sort();
    ids.dedup();
    ids
}

fn id_filter(field: &'static str, ids: Vec<String>) -> Filter {
    Filter::all().and(
        FieldPath::from_static(field),
        Predicate::In(ids.into_iter().map(Operand::new).collect()),
    )
}

/// Expands `relation` on every document in `docs`.
pub async fn populate(
    store: &dyn DocumentStore,
    docs: &mut [Document],
    relation: &Relation,
) -> Result<(), StoreError> {
    match *relation {
        Relation::BelongsTo {
            field,
            collection,
            select,
        } => {
            let ids = string_ids(docs.iter().filter_map(|doc| doc.get(field)));
            if ids.is_empty() {
                return Ok(());
            }

            let projection = select
                .map(Projection::parse)
                .transpose()
                .map_err(|e| StoreError::InvalidDocument(e.to_string()))?
                .flatten();
            let related = store
                .find(collection, &FindQuery::filtered(id_filter("id", ids)))
                .await?;
            let by_id: HashMap<String, Document> = related
                .into_iter()
                .filter_map(|doc| {
                    let id = doc.get("id")?.as_str()?.to_string();
                    let doc = match &projection {
                        Some(projection) => projection.apply(&doc),
                        None => doc,
                    };
                    Some((id, doc))
                })
                .collect();

            for doc in docs.iter_mut() {
                let Some(Value::String(id)) = doc.get(field) else {
                    continue;
                };
                let expanded = by_id
                    .get(id)
                    .cloned()
                    .map(Value::Object)
                    .unwrap_or(Value::Null);
                doc.insert(field.to_string(), expanded);
            }
        }
        Relation::HasMany {
            field,
            collection,
            foreign_field,
        } => {
            let ids = string_ids(docs.iter().filter_map(|doc| doc.get("id")));
            let mut grouped: HashMap<String, Vec<Value>> = HashMap::new();

            if !ids.is_empty() {
                let query = FindQuery {
                    filter: id_filter(foreign_field, ids),
                    sort: vec![SortKey {
                        field: FieldPath::from_static(CREATED_AT_FIELD),
                        descending: false,
                    }],
                    ..FindQuery::default()
                };
                for related in store.find(collection, &query).await? {
                    if let Some(owner) = related.get(foreign_field).and_then(Value::as_str) {
                        grouped
                            .entry(owner.to_string())
                            .or_default()
                            .push(Value::Object(related));
                    }
                }
            }

            for doc in docs.iter_mut() {
                let children = doc
                    .get("id")
                    .and_then(Value::as_str)
                    .and_then(|id| grouped.remove(id))
                    .unwrap_or_default();
                doc.insert(field.to_string(), Value::Array(children));
            }
        }
    }

    Ok(())
}
