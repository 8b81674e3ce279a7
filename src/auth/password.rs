use crate::error::AppError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// bcrypt only considers the first 72 bytes of input; anything longer must be
/// rejected up front instead of being silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes a password with bcrypt. Each call salts independently, so two
/// hashes of the same password differ but both verify against it.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::ValidationError(format!(
            "Password must be {} bytes or fewer",
            MAX_PASSWORD_BYTES
        )));
    }
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}

/// Checks a password against a stored hash. A wrong password is `Ok(false)`;
/// an error means the stored hash itself is structurally malformed.
pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::InternalServerError(format!("Failed to verify password: {}", e)))
}
