//! JWT claim structure for session tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use devcamper_core::AppError;

/// Claims embedded in a session token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}

impl Claims {
    /// Parses the subject back into a user id.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::unauthorized("Not authorized to access this route"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_deserialize() {
        let json = r#"{"sub":"5d7a514b-5d6c-4a0b-8f3e-2a9b1c3d4e5f","exp":9999999999,"iat":9999999900}"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.exp, 9999999999);
        assert_eq!(
            claims.user_id().unwrap().to_string(),
            "5d7a514b-5d6c-4a0b-8f3e-2a9b1c3d4e5f"
        );
    }

    #[test]
    fn test_non_uuid_subject_is_unauthorized() {
        let claims = Claims {
            sub: "admin".to_string(),
            exp: 1,
            iat: 0,
        };
        let err = claims.user_id().unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
