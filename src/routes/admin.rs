use crate::{
    auth::CurrentUser, config::AuthConfig, error::AppError, models::User,
    ownership::require_admin,
};
use actix_web::{get, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Lists every registered user.
///
/// Gated by the admin allowlist: the resolved user's email must be a member,
/// or the request answers `403 Forbidden` (the identity is known, the action
/// is not permitted — distinct from `401`).
#[get("/users")]
pub async fn list_users(
    pool: web::Data<PgPool>,
    auth: web::Data<AuthConfig>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    require_admin(&user.0, &auth)?;

    let users = sqlx::query_as::<_, User>(
        "SELECT id, email, created_at FROM users ORDER BY id",
    )
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(users))
}
