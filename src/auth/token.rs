use crate::config::AuthConfig;
use crate::error::AppError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a JWT (JSON Web Token).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's unique identifier, stringified.
    pub sub: String,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: usize,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Signs and verifies access tokens with a symmetric secret fixed at
/// construction time. One instance is built from [`AuthConfig`] at startup
/// and shared across requests; it holds no per-request state.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_minutes)
    }

    /// Generates a JWT for a given user ID, expiring `ttl_minutes` from now.
    ///
    /// The claims carry the stringified user id as subject plus issued-at and
    /// expiry timestamps. Once issued, a token stays valid for its full
    /// lifetime; there is no revocation list.
    pub fn generate_token(&self, user_id: i32, ttl_minutes: i64) -> Result<String, AppError> {
        let now = chrono::Utc::now();
        let expiration = now
            .checked_add_signed(chrono::Duration::minutes(ttl_minutes))
            .ok_or_else(|| AppError::InternalServerError("Token expiry out of range".into()))?;

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: expiration.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Generates a JWT with the configured default lifetime.
    pub fn generate_default(&self, user_id: i32) -> Result<String, AppError> {
        self.generate_token(user_id, self.ttl_minutes)
    }

    /// Verifies a JWT string and returns the subject user id.
    ///
    /// A bad signature, a structurally malformed token, a lapsed expiry, and
    /// a missing or non-numeric subject all collapse into the same
    /// `Unauthorized` answer, so a caller probing the endpoint learns nothing
    /// about which check failed. Expiry is checked with zero leeway.
    pub fn verify_token(&self, token: &str) -> Result<i32, AppError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        data.claims
            .sub
            .parse::<i32>()
            .map_err(|_| AppError::Unauthorized("Could not validate credentials".into()))
    }
}
