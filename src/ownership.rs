//!
//! # Ownership-Scoped Resource Access
//!
//! Every read and write of goals and tasks goes through the helpers in this
//! module, which scope the query by the requesting user's id. A resource
//! owned by someone else and a resource that does not exist produce the same
//! `NotFound`, so ids cannot be probed across accounts.
//!
//! The module also gates the privileged admin operation class: an
//! authenticated user must appear on the configured email allowlist, or the
//! operation fails with `Forbidden` (distinct from `Unauthorized` — the
//! caller's identity is established, the action is simply not permitted).

use sqlx::PgPool;

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::models::{Goal, Task, User};

/// Fetches a goal only if it belongs to `user_id`.
pub async fn find_owned_goal(
    pool: &PgPool,
    user_id: i32,
    goal_id: i32,
) -> Result<Goal, AppError> {
    let goal = sqlx::query_as::<_, Goal>(
        "SELECT id, user_id, title, description, created_at
         FROM goals WHERE id = $1 AND user_id = $2",
    )
    .bind(goal_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    goal.ok_or_else(|| AppError::NotFound("Goal not found".into()))
}

/// Fetches a task reached through a goal path. The task must belong to
/// `user_id` AND sit under the goal named in the path; a task whose stored
/// `goal_id` differs is treated as not found.
pub async fn find_owned_task(
    pool: &PgPool,
    user_id: i32,
    goal_id: i32,
    task_id: i32,
) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, user_id, goal_id, title, is_done, created_at
         FROM tasks WHERE id = $1 AND user_id = $2 AND goal_id = $3",
    )
    .bind(task_id)
    .bind(user_id)
    .bind(goal_id)
    .fetch_optional(pool)
    .await?;

    task.ok_or_else(|| AppError::NotFound("Task not found".into()))
}

/// Fetches a task addressed directly by id, scoped to its owner.
pub async fn find_owned_task_by_id(
    pool: &PgPool,
    user_id: i32,
    task_id: i32,
) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(
        "SELECT id, user_id, goal_id, title, is_done, created_at
         FROM tasks WHERE id = $1 AND user_id = $2",
    )
    .bind(task_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    task.ok_or_else(|| AppError::NotFound("Task not found".into()))
}

/// Requires the resolved user's email to appear on the admin allowlist.
pub fn require_admin(user: &User, auth: &AuthConfig) -> Result<(), AppError> {
    if auth.is_admin_email(&user.email) {
        Ok(())
    } else {
        Err(AppError::Forbidden("Admin access required".into()))
    }
}
