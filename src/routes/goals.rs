use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{Goal, GoalInput, GoalUpdate},
    ownership::find_owned_goal,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Retrieves the authenticated user's goals, newest first.
///
/// ## Responses:
/// - `200 OK`: Returns a JSON array of `Goal` objects.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[get("")]
pub async fn list_goals(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let goals = sqlx::query_as::<_, Goal>(
        "SELECT id, user_id, title, description, created_at
         FROM goals WHERE user_id = $1
         ORDER BY created_at DESC",
    )
    .bind(user.0.id)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(goals))
}

/// Creates a new goal owned by the authenticated user.
///
/// ## Request Body:
/// A JSON object matching `GoalInput`:
/// - `title`: 3 to 100 characters (required).
/// - `description` (optional): up to 500 characters.
///
/// ## Responses:
/// - `201 Created`: Returns the newly created `Goal` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `422 Unprocessable Entity`: If input validation on `GoalInput` fails.
/// - `500 Internal Server Error`: For database errors or other unexpected issues.
#[post("")]
pub async fn create_goal(
    pool: web::Data<PgPool>,
    goal_data: web::Json<GoalInput>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    goal_data.validate()?;

    let goal = sqlx::query_as::<_, Goal>(
        "INSERT INTO goals (user_id, title, description) VALUES ($1, $2, $3)
         RETURNING id, user_id, title, description, created_at",
    )
    .bind(user.0.id)
    .bind(&goal_data.title)
    .bind(&goal_data.description)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(goal))
}

/// Retrieves a single goal by id.
///
/// A goal that does not exist and a goal owned by a different user both
/// answer `404 Not Found`.
#[get("/{goal_id}")]
pub async fn get_goal(
    pool: web::Data<PgPool>,
    goal_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let goal = find_owned_goal(&pool, user.0.id, goal_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(goal))
}

/// Updates a goal owned by the authenticated user.
///
/// Accepts partial payloads: absent fields keep their stored values.
///
/// ## Responses:
/// - `200 OK`: Returns the updated `Goal` object as JSON.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the goal does not exist or is not owned by the user.
/// - `422 Unprocessable Entity`: If input validation on `GoalUpdate` fails.
#[put("/{goal_id}")]
pub async fn update_goal(
    pool: web::Data<PgPool>,
    goal_id: web::Path<i32>,
    goal_data: web::Json<GoalUpdate>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    goal_data.validate()?;
    let goal_id = goal_id.into_inner();

    // Resolve through the ownership guard before touching anything
    find_owned_goal(&pool, user.0.id, goal_id).await?;

    let goal = sqlx::query_as::<_, Goal>(
        "UPDATE goals
         SET title = COALESCE($1, title), description = COALESCE($2, description)
         WHERE id = $3 AND user_id = $4
         RETURNING id, user_id, title, description, created_at",
    )
    .bind(&goal_data.title)
    .bind(&goal_data.description)
    .bind(goal_id)
    .bind(user.0.id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(goal))
}

/// Deletes a goal owned by the authenticated user.
///
/// The backing store cascades the delete to the goal's tasks.
///
/// ## Responses:
/// - `204 No Content`: On successful deletion.
/// - `401 Unauthorized`: If the request lacks a valid authentication token.
/// - `404 Not Found`: If the goal does not exist or is not owned by the user.
#[delete("/{goal_id}")]
pub async fn delete_goal(
    pool: web::Data<PgPool>,
    goal_id: web::Path<i32>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
        .bind(goal_id.into_inner())
        .bind(user.0.id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Goal not found".into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
