//! JWT utilities for session tokens.
//!
//! Tokens are HS256-signed with the configured secret and expire after
//! [`JwtConfig::expire_days`]. The same token is returned in the response
//! body and in the `token` cookie.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use devcamper_config::JwtConfig;
use devcamper_core::AppError;

use crate::claims::Claims;

/// Creates a session token for `user_id`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_session_token(user_id: Uuid, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.expires_in_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
        iat: now,
    };

    encode_claims(&claims, jwt_config)
}

/// Signs an arbitrary claim set.
pub fn encode_claims(claims: &Claims, jwt_config: &JwtConfig) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies a session token and returns the embedded claims.
///
/// # Errors
///
/// Returns an unauthorized error if the signature is invalid, the token has
/// expired or the token is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Not authorized to access this route"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            expire_days: 30,
        }
    }

    #[test]
    fn test_session_token_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = create_session_token(user_id, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.exp - claims.iat, 30 * 24 * 60 * 60);
    }

    #[test]
    fn test_verify_token_invalid() {
        let result = verify_token("invalid-token", &test_config());
        assert_eq!(result.unwrap_err().status.as_u16(), 401);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let token = create_session_token(Uuid::new_v4(), &test_config()).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            expire_days: 30,
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        let config = test_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now - 3600,
            iat: now - 7200,
        };
        let token = encode_claims(&claims, &config).unwrap();

        assert!(verify_token(&token, &config).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let config = test_config();
        let token = create_session_token(Uuid::new_v4(), &config).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');

        assert!(verify_token(&tampered, &config).is_err());
    }
}
