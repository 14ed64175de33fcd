use thiserror::Error;

use devcamper_core::AppError;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A write would break a unique field (user email, bootcamp name).
    #[error("Duplicate value for unique field `{field}` in `{collection}`")]
    Duplicate { collection: String, field: String },
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
    #[error("Failed to acquire store lock: {0}")]
    Lock(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { .. } => AppError::duplicate_field(),
            other => AppError::internal(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_maps_to_bad_request() {
        let err: AppError = StoreError::Duplicate {
            collection: "users".into(),
            field: "email".into(),
        }
        .into();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.error.to_string(), "Duplicate field value entered");
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        let err: AppError = StoreError::Lock("poisoned".into()).into();
        assert_eq!(err.status.as_u16(), 500);
    }
}
