use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Task, TaskInput, TaskUpdate},
    ownership::{find_owned_goal, find_owned_task, find_owned_task_by_id},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Lists the tasks under a goal, newest first.
///
/// The parent goal is resolved through the ownership guard first, so a goal
/// id belonging to another user answers `404` before any task is read.
#[get("/{goal_id}/tasks")]
pub async fn list_tasks(
    pool: web::Data<PgPool>,
    goal_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let goal = find_owned_goal(&pool, user.0.id, goal_id.into_inner()).await?;

    let tasks = sqlx::query_as::<_, Task>(
        "SELECT id, user_id, goal_id, title, is_done, created_at
         FROM tasks WHERE goal_id = $1
         ORDER BY created_at DESC",
    )
    .bind(goal.id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task under a goal.
///
/// The created task inherits `user_id` from the authenticated user and
/// `goal_id` from the path; resolving the goal through the ownership guard
/// first is what keeps a task's owner equal to its goal's owner.
///
/// ## Request Body:
/// A JSON object matching `TaskInput`:
/// - `title`: 1 to 120 characters (required).
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the goal does not exist or is not owned by the user.
/// - `422 Unprocessable Entity`: If input validation on `TaskInput` fails.
#[post("/{goal_id}/tasks")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    goal_id: web::Path<i32>,
    task_data: web::Json<TaskInput>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let goal = find_owned_goal(&pool, user.0.id, goal_id.into_inner()).await?;

    let task = sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (user_id, goal_id, title, is_done) VALUES ($1, $2, $3, FALSE)
         RETURNING id, user_id, goal_id, title, is_done, created_at",
    )
    .bind(user.0.id)
    .bind(goal.id)
    .bind(&task_data.title)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(task))
}

/// Retrieves a single task through its goal path.
///
/// Both levels are guarded independently: the goal must be owned by the
/// requester, and the task must be owned by the requester AND stored under
/// that exact goal. A task reached through the wrong goal id is not found.
#[get("/{goal_id}/tasks/{task_id}")]
pub async fn get_task(
    pool: web::Data<PgPool>,
    path: web::Path<(i32, i32)>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let (goal_id, task_id) = path.into_inner();

    let goal = find_owned_goal(&pool, user.0.id, goal_id).await?;
    let task = find_owned_task(&pool, user.0.id, goal.id, task_id).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Updates a task owned by the authenticated user.
///
/// Accepts partial payloads: title and/or completion flag. `goal_id` and
/// `user_id` are immutable and not part of the payload.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Task` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the user.
/// - `422 Unprocessable Entity`: If input validation on `TaskUpdate` fails.
#[put("/{task_id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    task_data: web::Json<TaskUpdate>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task_id = task_id.into_inner();

    // Resolve through the ownership guard before touching anything
    find_owned_task_by_id(&pool, user.0.id, task_id).await?;

    let task = sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = COALESCE($1, title), is_done = COALESCE($2, is_done)
         WHERE id = $3 AND user_id = $4
         RETURNING id, user_id, goal_id, title, is_done, created_at",
    )
    .bind(&task_data.title)
    .bind(task_data.is_done)
    .bind(task_id)
    .bind(user.0.id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// Deletes a task owned by the authenticated user.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the task does not exist or is not owned by the user.
#[delete("/{task_id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
        .bind(task_id.into_inner())
        .bind(user.0.id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
