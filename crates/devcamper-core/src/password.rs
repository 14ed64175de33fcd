use bcrypt::{hash, verify};

use crate::errors::AppError;

/// bcrypt work factor used for every stored password.
pub const HASH_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, HASH_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash_password("123456").unwrap();
        assert_ne!(hashed, "123456");
        assert!(verify_password("123456", &hashed).unwrap());
        assert!(!verify_password("654321", &hashed).unwrap());
    }

    #[test]
    fn test_verify_against_garbage_hash_errors() {
        assert!(verify_password("123456", "not-a-bcrypt-hash").is_err());
    }
}
