//! Password hashing with bcrypt.

use tapeo_core::auth::AuthError;

/// Hashes a password for storage.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verifies a password against a stored hash.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, password_hash).map_err(|e| AuthError::Hashing(e.to_string()))
}
