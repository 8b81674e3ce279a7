pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::CurrentUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password, MAX_PASSWORD_BYTES};
pub use token::{Claims, TokenService};

/// Normalizes an email for storage and lookup: surrounding whitespace is
/// trimmed and the address is lowercased, making uniqueness checks and
/// login lookups case-insensitive.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// User's password.
    /// Must be at least 6 characters long.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address for the new account.
    /// Must be a valid email format.
    #[validate(email)]
    pub email: String,
    /// Password for the new account.
    /// Must be at least 6 characters long. The upper bound (72 bytes) is
    /// checked separately at registration, since it is a byte limit, not a
    /// character limit.
    #[validate(length(min = 6))]
    pub password: String,
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed access token for bearer authentication.
    pub access_token: String,
    /// Token transport scheme; always `"bearer"`.
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
