use serde_json::Value;
use tracing::{info, instrument, warn};

use devcamper_core::{AppError, hash_password, verify_password};
use devcamper_db::DocumentStore;
use devcamper_models::{
    CreateUserDto, LoginRequest, RegisterRequest, UpdateDetailsRequest, UpdatePasswordRequest,
    User, to_document,
};

use crate::modules::users::service::UserService;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn register(
        store: &dyn DocumentStore,
        dto: RegisterRequest,
    ) -> Result<User, AppError> {
        let dto = CreateUserDto {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            role: dto.role,
        };
        UserService::create_user(store, dto).await
    }

    /// Checks the credentials. Unknown email and wrong password fail alike.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn login(store: &dyn DocumentStore, dto: LoginRequest) -> Result<User, AppError> {
        let Some(user) = UserService::find_by_email(store, &dto.email).await? else {
            warn!("Login for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &user.password)? {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    #[instrument(skip(store, user, dto), fields(user_id = %user.id))]
    pub async fn update_details(
        store: &dyn DocumentStore,
        user: &User,
        dto: UpdateDetailsRequest,
    ) -> Result<User, AppError> {
        UserService::patch_user(store, user.id, to_document(&dto)?).await
    }

    /// Replaces the password after checking the current one.
    #[instrument(skip(store, user, dto), fields(user_id = %user.id))]
    pub async fn update_password(
        store: &dyn DocumentStore,
        user: &User,
        dto: UpdatePasswordRequest,
    ) -> Result<User, AppError> {
        if !verify_password(&dto.current_password, &user.password)? {
            return Err(AppError::unauthorized("Password is incorrect"));
        }

        let mut patch = serde_json::Map::new();
        patch.insert(
            "password".to_string(),
            Value::String(hash_password(&dto.new_password)?),
        );
        let updated = UserService::patch_user(store, user.id, patch).await?;
        info!("Password updated");
        Ok(updated)
    }
}
