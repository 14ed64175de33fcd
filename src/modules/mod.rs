pub mod auth;
pub mod bootcamps;
pub mod courses;
pub mod reviews;
pub mod users;

use uuid::Uuid;

use devcamper_core::AppError;
use devcamper_db::DocumentStore;
use devcamper_models::{Model, from_document};

/// Loads and decodes one document of `T`'s collection.
pub(crate) async fn find_model<T: Model>(
    store: &dyn DocumentStore,
    id: Uuid,
) -> Result<Option<T>, AppError> {
    match store.find_by_id(T::COLLECTION, id).await? {
        Some(doc) => Ok(Some(from_document(doc)?)),
        None => Ok(None),
    }
}
