use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents a task entity as stored in the database and returned by the API.
///
/// A task always belongs to exactly one goal and one user, and its `user_id`
/// equals its parent goal's `user_id`: tasks are only ever created under a
/// goal already resolved through the ownership guard.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task.
    pub id: i32,
    /// Identifier of the user who owns the task. Immutable after creation.
    pub user_id: i32,
    /// Identifier of the parent goal. Immutable after creation.
    pub goal_id: i32,
    /// The title of the task.
    pub title: String,
    /// Whether the task has been completed.
    pub is_done: bool,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
}

/// Input structure for creating a task under a goal.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 120 characters.
    #[validate(length(min = 1, max = 120))]
    pub title: String,
}

/// Input structure for updating a task. All fields are optional; absent
/// fields leave the stored value unchanged.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 120))]
    pub title: Option<String>,

    pub is_done: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_input_validation() {
        let valid_input = TaskInput {
            title: "Read chapter 4".to_string(),
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TaskInput {
            title: "".to_string(),
        };
        assert!(
            empty_title.validate().is_err(),
            "Validation should fail for empty title."
        );

        let long_title = TaskInput {
            title: "a".repeat(121),
        };
        assert!(
            long_title.validate().is_err(),
            "Validation should fail for overly long title."
        );
    }

    #[test]
    fn test_task_update_validation() {
        let toggle_only = TaskUpdate {
            title: None,
            is_done: Some(true),
        };
        assert!(toggle_only.validate().is_ok());

        let invalid_title = TaskUpdate {
            title: Some("".to_string()),
            is_done: None,
        };
        assert!(invalid_title.validate().is_err());
    }
}
