use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents a goal entity as stored in the database and returned by the API.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Goal {
    /// Unique identifier for the goal.
    pub id: i32,
    /// Identifier of the user who owns the goal. Immutable after creation.
    pub user_id: i32,
    /// The title of the goal.
    pub title: String,
    /// An optional description for the goal.
    pub description: Option<String>,
    /// Timestamp of when the goal was created.
    pub created_at: DateTime<Utc>,
}

/// Input structure for creating a goal.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct GoalInput {
    /// The title of the goal.
    /// Must be between 3 and 100 characters.
    #[validate(length(min = 3, max = 100))]
    pub title: String,

    /// An optional description for the goal.
    /// Maximum length of 500 characters if provided.
    #[validate(length(max = 500))]
    pub description: Option<String>,
}

/// Input structure for updating a goal. All fields are optional; absent
/// fields leave the stored value unchanged.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct GoalUpdate {
    #[validate(length(min = 3, max = 100))]
    pub title: Option<String>,

    #[validate(length(max = 500))]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_input_validation() {
        let valid_input = GoalInput {
            title: "Learn Rust".to_string(),
            description: Some("Work through the book".to_string()),
        };
        assert!(valid_input.validate().is_ok());

        // Title below the 3-character minimum
        let short_title = GoalInput {
            title: "ab".to_string(),
            description: None,
        };
        assert!(short_title.validate().is_err());

        let long_title = GoalInput {
            title: "a".repeat(101),
            description: None,
        };
        assert!(long_title.validate().is_err());

        let long_description = GoalInput {
            title: "Valid title".to_string(),
            description: Some("d".repeat(501)),
        };
        assert!(long_description.validate().is_err());

        // Description is optional
        let no_description = GoalInput {
            title: "Valid title".to_string(),
            description: None,
        };
        assert!(no_description.validate().is_ok());
    }

    #[test]
    fn test_goal_update_validation() {
        let empty_update = GoalUpdate {
            title: None,
            description: None,
        };
        assert!(empty_update.validate().is_ok());

        let invalid_title = GoalUpdate {
            title: Some("ab".to_string()),
            description: None,
        };
        assert!(invalid_title.validate().is_err());

        let valid_partial = GoalUpdate {
            title: Some("New title".to_string()),
            description: None,
        };
        assert!(valid_partial.validate().is_ok());
    }
}
