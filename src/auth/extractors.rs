use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::error::AppError;
use crate::models::User;

/// Extracts the authenticated user for the current request.
///
/// `AuthMiddleware` verifies the bearer token and inserts the subject user id
/// into request extensions; this extractor finishes identity resolution by
/// loading the user row. A token whose subject no longer exists (a stale
/// token for a deleted account) fails with the same `Unauthorized` answer as
/// a bad token, so the two cases cannot be told apart.
///
/// Resolution happens on every request; nothing is cached across requests.
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = ActixError; // AppError will be converted into ActixError via ResponseError
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user_id = req.extensions().get::<i32>().copied();
        let pool = req.app_data::<web::Data<PgPool>>().cloned();

        Box::pin(async move {
            let user_id = user_id.ok_or_else(|| {
                // This case should not be reached if AuthMiddleware is
                // correctly applied. Responding with Unauthorized is a safe
                // default.
                AppError::Unauthorized(
                    "User ID not found in request. Ensure AuthMiddleware is active.".to_string(),
                )
            })?;
            let pool = pool.ok_or_else(|| {
                AppError::InternalServerError("Database pool not configured".to_string())
            })?;

            let user = sqlx::query_as::<_, User>(
                "SELECT id, email, created_at FROM users WHERE id = $1",
            )
            .bind(user_id)
            .fetch_optional(pool.get_ref())
            .await
            .map_err(AppError::from)?;

            match user {
                Some(user) => Ok(CurrentUser(user)),
                None => {
                    Err(AppError::Unauthorized("Could not validate credentials".into()).into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::Payload;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_rt::test]
    async fn test_current_user_extractor_without_middleware() {
        let req = test::TestRequest::default().to_http_request();
        // No user_id inserted into extensions

        let mut payload = Payload::None;
        let result = CurrentUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let err = result.err().unwrap();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_current_user_extractor_without_pool() {
        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(123_i32);

        // user_id present but no PgPool registered: a wiring error, not an
        // authentication failure
        let mut payload = Payload::None;
        let result = CurrentUser::from_request(&req, &mut payload).await;
        assert!(result.is_err());

        let err = result.err().unwrap();
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
