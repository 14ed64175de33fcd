use anyhow::anyhow;
use tracing::{info, instrument};
use uuid::Uuid;

use devcamper_core::{AppError, Filter, hash_password};
use devcamper_db::{Document, DocumentStore};
use devcamper_models::{
    CreateUserDto, Model, NewUser, UpdateUserDto, User, from_document, to_document,
};

use crate::middleware::advanced_results::Resource;

impl Resource for User {
    const HIDDEN_FIELDS: &'static [&'static str] = &["password"];
}

fn not_found(id: Uuid) -> AppError {
    AppError::not_found(anyhow!("User not found with id of {}", id))
}

pub(crate) fn user_from(doc: Document) -> Result<User, AppError> {
    Ok(from_document(doc)?)
}

pub struct UserService;

impl UserService {
    #[instrument(skip(store))]
    pub async fn get_user(store: &dyn DocumentStore, id: Uuid) -> Result<User, AppError> {
        let doc = store
            .find_by_id(User::COLLECTION, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        user_from(doc)
    }

    /// Looks an account up by email, including its password hash.
    #[instrument(skip(store))]
    pub async fn find_by_email(
        store: &dyn DocumentStore,
        email: &str,
    ) -> Result<Option<User>, AppError> {
        store
            .find_one(User::COLLECTION, &Filter::eq("email", email))
            .await?
            .map(user_from)
            .transpose()
    }

    /// Hashes the password and stores the account. Duplicate emails are a 400.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn create_user(
        store: &dyn DocumentStore,
        dto: CreateUserDto,
    ) -> Result<User, AppError> {
        let role = dto.role.unwrap_or_default();
        let user = NewUser {
            name: dto.name,
            email: dto.email,
            role,
            password: hash_password(&dto.password)?,
        };

        let doc = store.insert(User::COLLECTION, to_document(&user)?).await?;
        let user = user_from(doc)?;
        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    #[instrument(skip(store, patch))]
    pub async fn patch_user(
        store: &dyn DocumentStore,
        id: Uuid,
        patch: Document,
    ) -> Result<User, AppError> {
        let doc = store
            .update_by_id(User::COLLECTION, id, patch)
            .await?
            .ok_or_else(|| not_found(id))?;
        user_from(doc)
    }

    #[instrument(skip(store, dto))]
    pub async fn update_user(
        store: &dyn DocumentStore,
        id: Uuid,
        dto: UpdateUserDto,
    ) -> Result<User, AppError> {
        let user = Self::patch_user(store, id, to_document(&dto)?).await?;
        info!(user_id = %id, "User updated");
        Ok(user)
    }

    #[instrument(skip(store))]
    pub async fn delete_user(store: &dyn DocumentStore, id: Uuid) -> Result<(), AppError> {
        store
            .delete_by_id(User::COLLECTION, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
