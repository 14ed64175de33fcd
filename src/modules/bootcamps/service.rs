use anyhow::anyhow;
use tracing::{info, instrument};
use uuid::Uuid;

use devcamper_core::{AppError, Filter};
use devcamper_db::{DocumentStore, Relation};
use devcamper_models::{
    Bootcamp, Course, CreateBootcampDto, Model, Review, UpdateBootcampDto, from_document,
};

use crate::middleware::advanced_results::Resource;
use crate::middleware::auth::AuthUser;
use crate::modules::find_model;

impl Resource for Bootcamp {
    const POPULATE: Option<Relation> = Some(Relation::HasMany {
        field: "courses",
        collection: Course::COLLECTION,
        foreign_field: "bootcamp",
    });
}

pub(crate) fn not_found(id: Uuid) -> AppError {
    AppError::not_found(anyhow!("Bootcamp not found with id of {}", id))
}

pub struct BootcampService;

impl BootcampService {
    #[instrument(skip(store))]
    pub async fn get_bootcamp(store: &dyn DocumentStore, id: Uuid) -> Result<Bootcamp, AppError> {
        find_model(store, id).await?.ok_or_else(|| not_found(id))
    }

    /// Publishers may own a single bootcamp; admins any number.
    #[instrument(skip(store, user, dto), fields(user_id = %user.id(), name = %dto.name))]
    pub async fn create_bootcamp(
        store: &dyn DocumentStore,
        user: &AuthUser,
        dto: CreateBootcampDto,
    ) -> Result<Bootcamp, AppError> {
        if !user.is_admin() {
            let owned = store
                .find_one(
                    Bootcamp::COLLECTION,
                    &Filter::eq("user", user.id().to_string()),
                )
                .await?;
            if owned.is_some() {
                return Err(AppError::bad_request(anyhow!(
                    "The user with ID {} has already published a bootcamp",
                    user.id()
                )));
            }
        }

        let doc = store
            .insert(Bootcamp::COLLECTION, dto.into_document(user.id())?)
            .await?;
        let bootcamp: Bootcamp = from_document(doc)?;
        info!(bootcamp_id = %bootcamp.id, slug = %bootcamp.slug, "Bootcamp created");
        Ok(bootcamp)
    }

    #[instrument(skip(store, user, dto), fields(user_id = %user.id()))]
    pub async fn update_bootcamp(
        store: &dyn DocumentStore,
        user: &AuthUser,
        id: Uuid,
        dto: UpdateBootcampDto,
    ) -> Result<Bootcamp, AppError> {
        let bootcamp = Self::get_bootcamp(store, id).await?;
        user.ensure_owner_or_admin(bootcamp.user, "update this bootcamp")?;

        let doc = store
            .update_by_id(Bootcamp::COLLECTION, id, dto.into_patch()?)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(bootcamp_id = %id, "Bootcamp updated");
        Ok(from_document(doc)?)
    }

    /// Deletes the bootcamp together with its courses and reviews.
    #[instrument(skip(store, user), fields(user_id = %user.id()))]
    pub async fn delete_bootcamp(
        store: &dyn DocumentStore,
        user: &AuthUser,
        id: Uuid,
    ) -> Result<(), AppError> {
        let bootcamp = Self::get_bootcamp(store, id).await?;
        user.ensure_owner_or_admin(bootcamp.user, "delete this bootcamp")?;

        let children = Filter::eq("bootcamp", id.to_string());
        let courses = store.delete_many(Course::COLLECTION, &children).await?;
        let reviews = store.delete_many(Review::COLLECTION, &children).await?;
        store.delete_by_id(Bootcamp::COLLECTION, id).await?;

        info!(bootcamp_id = %id, courses, reviews, "Bootcamp deleted");
        Ok(())
    }
}
