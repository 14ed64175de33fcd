//! Bulk import and removal of seed data.
//!
//! A seed directory holds up to four JSON files, one array of documents per
//! collection: `users.json`, `bootcamps.json`, `courses.json` and
//! `reviews.json`. Documents may carry foreign ids (for instance 24-character
//! hex ids exported from another system) in `_id`, `user` and `bootcamp`; every
//! id that is not already a UUID is replaced by a fresh UUID, consistently
//! across files.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use devcamper_core::{Filter, hash_password};
use devcamper_db::{Document, DocumentStore, StoreError};
use devcamper_models::aggregates::{refresh_average_cost, refresh_average_rating};
use devcamper_models::bootcamps::DEFAULT_PHOTO;
use devcamper_models::{
    Bootcamp, Course, CreateUserDto, Model, NewUser, Review, Role, User, slugify, to_document,
};

/// Collections in dependency order: referenced documents come first.
pub const COLLECTIONS: [&str; 4] = [
    User::COLLECTION,
    Bootcamp::COLLECTION,
    Course::COLLECTION,
    Review::COLLECTION,
];

const REFERENCE_FIELDS: [&str; 2] = ["user", "bootcamp"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub counts: Vec<(&'static str, usize)>,
}

impl ImportSummary {
    pub fn get(&self, collection: &str) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == collection)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

/// Maps foreign ids to UUIDs for the duration of one import.
#[derive(Default)]
struct IdMap(HashMap<String, Uuid>);

impl IdMap {
    fn resolve(&mut self, raw: &str) -> Uuid {
        if let Ok(id) = Uuid::parse_str(raw) {
            return id;
        }
        *self.0.entry(raw.to_string()).or_insert_with(Uuid::new_v4)
    }
}

fn prepare(collection: &str, mut doc: Document, ids: &mut IdMap) -> Result<Document> {
    doc.remove("__v");

    let id = match doc.remove("_id").or_else(|| doc.remove("id")) {
        Some(Value::String(raw)) => ids.resolve(&raw),
        Some(other) => bail!("Unsupported id {} in {}", other, collection),
        None => Uuid::new_v4(),
    };
    doc.insert("id".to_string(), Value::String(id.to_string()));

    for field in REFERENCE_FIELDS {
        let remapped = match doc.get(field) {
            Some(Value::String(raw)) => Some(ids.resolve(raw)),
            _ => None,
        };
        if let Some(target) = remapped {
            doc.insert(field.to_string(), Value::String(target.to_string()));
        }
    }

    if collection == User::COLLECTION {
        let password = match doc.get("password") {
            Some(Value::String(p)) if p.starts_with("$2") => p.clone(),
            Some(Value::String(p)) => hash_password(p).map_err(|e| e.error)?,
            _ => bail!("User {} has no password", id),
        };
        doc.insert("password".to_string(), Value::String(password));
        doc.entry("role")
            .or_insert_with(|| Value::String(Role::User.to_string()));
    }

    if collection == Bootcamp::COLLECTION {
        if !doc.contains_key("slug") {
            let slug = doc
                .get("name")
                .and_then(Value::as_str)
                .map(slugify)
                .unwrap_or_default();
            doc.insert("slug".to_string(), Value::String(slug));
        }
        doc.entry("photo")
            .or_insert_with(|| Value::String(DEFAULT_PHOTO.to_string()));
    }

    Ok(doc)
}

/// Imports every seed file found in `dir` and refreshes bootcamp averages.
pub async fn import_dir(store: &dyn DocumentStore, dir: &Path) -> Result<ImportSummary> {
    let mut ids = IdMap::default();
    let mut summary = ImportSummary::default();
    let mut bootcamp_ids = Vec::new();

    for collection in COLLECTIONS {
        let path = dir.join(format!("{}.json", collection));
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            summary.counts.push((collection, 0));
            continue;
        }

        let raw = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let docs: Vec<Document> = serde_json::from_str(&raw)
            .with_context(|| format!("{} is not a JSON array of objects", path.display()))?;

        let mut inserted = 0;
        for doc in docs {
            let doc = prepare(collection, doc, &mut ids)?;
            let stored = store
                .insert(collection, doc)
                .await
                .with_context(|| format!("Failed to import into {}", collection))?;
            if collection == Bootcamp::COLLECTION {
                if let Some(id) = stored.get("id").and_then(Value::as_str) {
                    bootcamp_ids.push(Uuid::parse_str(id)?);
                }
            }
            inserted += 1;
        }
        summary.counts.push((collection, inserted));
    }

    for id in bootcamp_ids {
        refresh_average_cost(store, id).await?;
        refresh_average_rating(store, id).await?;
    }

    Ok(summary)
}

/// Deletes every document of the seeded collections. Returns how many were removed.
pub async fn destroy(store: &dyn DocumentStore) -> Result<u64, StoreError> {
    let mut removed = 0;
    for collection in COLLECTIONS.iter().rev() {
        removed += store.delete_many(collection, &Filter::all()).await?;
    }
    Ok(removed)
}

/// Creates an admin account and returns its id.
pub async fn create_admin(
    store: &dyn DocumentStore,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Uuid> {
    let dto = CreateUserDto {
        name: name.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        role: Some(Role::Admin),
    };
    dto.validate()?;

    let user = NewUser {
        name: dto.name,
        email: dto.email,
        role: Role::Admin,
        password: hash_password(&dto.password).map_err(|e| e.error)?,
    };

    let stored = match store.insert(User::COLLECTION, to_document(&user)?).await {
        Ok(doc) => doc,
        Err(StoreError::Duplicate { .. }) => bail!("User with this email already exists"),
        Err(e) => return Err(e.into()),
    };

    let id = stored
        .get("id")
        .and_then(Value::as_str)
        .context("Stored user has no id")?;
    Ok(Uuid::parse_str(id)?)
}
