use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Hashes a plaintext password for storage on the user row. Only the bcrypt
/// hash ever reaches the database.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks a login attempt against the stored hash.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    verify(password, stored_hash)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}
