use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents a user account as returned by the API.
///
/// The stored password hash is never part of this record; login queries it
/// separately and it stays out of every response body.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique identifier for the user.
    pub id: i32,
    /// The user's email address, stored trimmed and lowercased.
    pub email: String,
    /// Timestamp of when the account was created.
    pub created_at: DateTime<Utc>,
}
