//! Derived bootcamp fields kept in step with courses and reviews.
//!
//! `averageCost` and `averageRating` are stored on the bootcamp document so
//! that listing queries can filter and sort on them. They are recomputed after
//! every course or review write.

use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

use devcamper_core::Filter;
use devcamper_db::{DocumentStore, FindQuery, StoreError};

use crate::bootcamps::{Bootcamp, average_cost, average_rating};
use crate::courses::Course;
use crate::document::Model;
use crate::reviews::Review;

async fn numbers(
    store: &dyn DocumentStore,
    collection: &str,
    bootcamp_id: Uuid,
    field: &str,
) -> Result<Vec<f64>, StoreError> {
    let docs = store
        .find(
            collection,
            &FindQuery::filtered(Filter::eq("bootcamp", bootcamp_id.to_string())),
        )
        .await?;

    Ok(docs
        .iter()
        .filter_map(|doc| doc.get(field).and_then(Value::as_f64))
        .collect())
}

fn number_or_null(value: Option<f64>) -> Value {
    value.map(|v| json!(v)).unwrap_or(Value::Null)
}

/// Recomputes `averageCost` from the bootcamp's course tuitions.
pub async fn refresh_average_cost(
    store: &dyn DocumentStore,
    bootcamp_id: Uuid,
) -> Result<Option<f64>, StoreError> {
    let tuitions = numbers(store, Course::COLLECTION, bootcamp_id, "tuition").await?;
    let average = average_cost(&tuitions);

    let mut patch = serde_json::Map::new();
    patch.insert("averageCost".to_string(), number_or_null(average));
    store
        .update_by_id(Bootcamp::COLLECTION, bootcamp_id, patch)
        .await?;

    debug!(bootcamp_id = %bootcamp_id, average_cost = ?average, "Average cost refreshed");
    Ok(average)
}

/// Recomputes `averageRating` from the bootcamp's reviews.
pub async fn refresh_average_rating(
    store: &dyn DocumentStore,
    bootcamp_id: Uuid,
) -> Result<Option<f64>, StoreError> {
    let ratings = numbers(store, Review::COLLECTION, bootcamp_id, "rating").await?;
    let average = average_rating(&ratings);

    let mut patch = serde_json::Map::new();
    patch.insert("averageRating".to_string(), number_or_null(average));
    store
        .update_by_id(Bootcamp::COLLECTION, bootcamp_id, patch)
        .await?;

    debug!(bootcamp_id = %bootcamp_id, average_rating = ?average, "Average rating refreshed");
    Ok(average)
}

#[cfg(test)]
mod tests {
    use super::*;
    use devcamper_db::MemoryStore;

    async fn bootcamp(store: &MemoryStore) -> Uuid {
        let doc = store
            .insert(
                Bootcamp::COLLECTION,
                json!({"name": "Devworks"}).as_object().cloned().unwrap(),
            )
            .await
            .unwrap();
        Uuid::parse_str(doc["id"].as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_refresh_average_cost() {
        let store = MemoryStore::new();
        let id = bootcamp(&store).await;
        for tuition in [10000, 12500] {
            store
                .insert(
                    Course::COLLECTION,
                    json!({"bootcamp": id.to_string(), "tuition": tuition})
                        .as_object()
                        .cloned()
                        .unwrap(),
                )
                .await
                .unwrap();
        }

        assert_eq!(refresh_average_cost(&store, id).await.unwrap(), Some(11250.0));
        let stored = store.find_by_id(Bootcamp::COLLECTION, id).await.unwrap().unwrap();
        assert_eq!(stored["averageCost"], json!(11250.0));
    }

    #[tokio::test]
    async fn test_refresh_without_reviews_clears_rating() {
        let store = MemoryStore::new();
        let id = bootcamp(&store).await;

        assert_eq!(refresh_average_rating(&store, id).await.unwrap(), None);
        let stored = store.find_by_id(Bootcamp::COLLECTION, id).await.unwrap().unwrap();
        assert_eq!(stored["averageRating"], Value::Null);
    }
}
