use anyhow::anyhow;
use tracing::{info, instrument};
use uuid::Uuid;

use devcamper_core::AppError;
use devcamper_db::{Document, DocumentStore, Relation, populate};
use devcamper_models::aggregates::refresh_average_cost;
use devcamper_models::{Bootcamp, Course, CreateCourseDto, Model, UpdateCourseDto, from_document};

use crate::middleware::advanced_results::Resource;
use crate::middleware::auth::AuthUser;
use crate::modules::find_model;

/// Courses and reviews show the name and description of their bootcamp.
pub(crate) const BOOTCAMP_SUMMARY: Relation = Relation::BelongsTo {
    field: "bootcamp",
    collection: Bootcamp::COLLECTION,
    select: Some("name,description"),
};

impl Resource for Course {
    const POPULATE: Option<Relation> = Some(BOOTCAMP_SUMMARY);
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(anyhow!("No course with the id of {}", id))
}

fn bootcamp_not_found(id: Uuid) -> AppError {
    AppError::not_found(anyhow!("No bootcamp with the id of {}", id))
}

pub struct CourseService;

impl CourseService {
    /// The course with its bootcamp summary expanded.
    #[instrument(skip(store))]
    pub async fn get_course(store: &dyn DocumentStore, id: Uuid) -> Result<Document, AppError> {
        let doc = store
            .find_by_id(Course::COLLECTION, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let mut docs = [doc];
        populate(store, &mut docs, &BOOTCAMP_SUMMARY).await?;
        let [doc] = docs;
        Ok(doc)
    }

    /// Only the bootcamp owner or an admin may add courses to it.
    #[instrument(skip(store, user, dto), fields(user_id = %user.id()))]
    pub async fn create_course(
        store: &dyn DocumentStore,
        user: &AuthUser,
        bootcamp_id: Uuid,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let bootcamp: Bootcamp = find_model(store, bootcamp_id)
            .await?
            .ok_or_else(|| bootcamp_not_found(bootcamp_id))?;
        user.ensure_owner_or_admin(
            bootcamp.user,
            &format!("add a course to bootcamp {}", bootcamp_id),
        )?;

        let doc = store
            .insert(Course::COLLECTION, dto.into_document(bootcamp_id, user.id())?)
            .await?;
        let course: Course = from_document(doc)?;
        refresh_average_cost(store, bootcamp_id).await?;

        info!(course_id = %course.id, bootcamp_id = %bootcamp_id, "Course created");
        Ok(course)
    }

    #[instrument(skip(store, user, dto), fields(user_id = %user.id()))]
    pub async fn update_course(
        store: &dyn DocumentStore,
        user: &AuthUser,
        id: Uuid,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let course: Course = find_model(store, id).await?.ok_or_else(|| not_found(id))?;
        user.ensure_owner_or_admin(course.user, &format!("update course {}", id))?;

        let patch = devcamper_models::to_document(&dto)?;
        let doc = store
            .update_by_id(Course::COLLECTION, id, patch)
            .await?
            .ok_or_else(|| not_found(id))?;
        refresh_average_cost(store, course.bootcamp).await?;

        info!(course_id = %id, "Course updated");
        Ok(from_document(doc)?)
    }

    #[instrument(skip(store, user), fields(user_id = %user.id()))]
    pub async fn delete_course(
        store: &dyn DocumentStore,
        user: &AuthUser,
        id: Uuid,
    ) -> Result<(), AppError> {
        let course: Course = find_model(store, id).await?.ok_or_else(|| not_found(id))?;
        user.ensure_owner_or_admin(course.user, &format!("delete course {}", id))?;

        store.delete_by_id(Course::COLLECTION, id).await?;
        refresh_average_cost(store, course.bootcamp).await?;

        info!(course_id = %id, "Course deleted");
        Ok(())
    }
}
