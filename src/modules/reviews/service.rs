use anyhow::anyhow;
use tracing::{info, instrument};
use uuid::Uuid;

use devcamper_core::{AppError, Filter};
use devcamper_db::{Document, DocumentStore, Relation, StoreError, populate};
use devcamper_models::aggregates::refresh_average_rating;
use devcamper_models::{
    Bootcamp, CreateReviewDto, Model, Review, UpdateReviewDto, from_document, to_document,
};

use crate::middleware::advanced_results::Resource;
use crate::middleware::auth::AuthUser;
use crate::modules::courses::service::BOOTCAMP_SUMMARY;
use crate::modules::find_model;

impl Resource for Review {
    const POPULATE: Option<Relation> = Some(BOOTCAMP_SUMMARY);
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(anyhow!("No review found with the id of {}", id))
}

fn already_reviewed(user_id: Uuid, bootcamp_id: Uuid) -> AppError {
    AppError::bad_request(anyhow!(
        "User {} has already reviewed bootcamp {}",
        user_id,
        bootcamp_id
    ))
}

pub struct ReviewService;

impl ReviewService {
    #[instrument(skip(store))]
    pub async fn get_review(store: &dyn DocumentStore, id: Uuid) -> Result<Document, AppError> {
        let doc = store
            .find_by_id(Review::COLLECTION, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut docs = [doc];
        populate(store, &mut docs, &BOOTCAMP_SUMMARY).await?;
        let [doc] = docs;
        Ok(doc)
    }

    /// One review per account and bootcamp.
    #[instrument(skip(store, user, dto), fields(user_id = %user.id()))]
    pub async fn create_review(
        store: &dyn DocumentStore,
        user: &AuthUser,
        bootcamp_id: Uuid,
        dto: CreateReviewDto,
    ) -> Result<Review, AppError> {
        if store.find_by_id(Bootcamp::COLLECTION, bootcamp_id).await?.is_none() {
            return Err(AppError::not_found(anyhow!(
                "No bootcamp with the id of {}",
                bootcamp_id
            )));
        }

        let filter = Filter::eq("bootcamp", bootcamp_id.to_string())
            .and_eq("user", user.id().to_string());
        if store.find_one(Review::COLLECTION, &filter).await?.is_some() {
            return Err(already_reviewed(user.id(), bootcamp_id));
        }

        // The unique key on (bootcamp, user) catches a concurrent insert that
        // slipped past the check above.
        let doc = match store
            .insert(Review::COLLECTION, dto.into_document(bootcamp_id, user.id())?)
            .await
        {
            Ok(doc) => doc,
            Err(StoreError::Duplicate { .. }) => {
                return Err(already_reviewed(user.id(), bootcamp_id));
            }
            Err(e) => return Err(e.into()),
        };
        let review: Review = from_document(doc)?;
        refresh_average_rating(store, bootcamp_id).await?;

        info!(review_id = %review.id, bootcamp_id = %bootcamp_id, "Review created");
        Ok(review)
    }

    #[instrument(skip(store, user, dto), fields(user_id = %user.id()))]
    pub async fn update_review(
        store: &dyn DocumentStore,
        user: &AuthUser,
        id: Uuid,
        dto: UpdateReviewDto,
    ) -> Result<Review, AppError> {
        let review: Review = find_model(store, id).await?.ok_or_else(|| not_found(id))?;
        user.ensure_owner_or_admin(review.user, "update this review")?;

        let doc = store
            .update_by_id(Review::COLLECTION, id, to_document(&dto)?)
            .await?
            .ok_or_else(|| not_found(id))?;
        refresh_average_rating(store, review.bootcamp).await?;

        info!(review_id = %id, "Review updated");
        Ok(from_document(doc)?)
    }

    #[instrument(skip(store, user), fields(user_id = %user.id()))]
    pub async fn delete_review(
        store: &dyn DocumentStore,
        user: &AuthUser,
        id: Uuid,
    ) -> Result<(), AppError> {
        let review: Review = find_model(store, id).await?.ok_or_else(|| not_found(id))?;
        user.ensure_owner_or_admin(review.user, "delete this review")?;

        store.delete_by_id(Review::COLLECTION, id).await?;
        refresh_average_rating(store, review.bootcamp).await?;

        info!(review_id = %id, "Review deleted");
        Ok(())
    }
}
