use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::middleware::Logger;
use actix_web::{test, web, App, Error};
use dotenv::dotenv;
use serde_json::json;
use sqlx::PgPool;

use goaltrack::auth::{AuthMiddleware, TokenService};
use goaltrack::config::AuthConfig;
use goaltrack::routes;

fn test_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".to_string(),
        token_ttl_minutes: 240,
        admin_emails: Vec::new(),
    }
}

/// Registers a fresh account (removing any leftover from a prior run) and
/// returns a bearer token for it.
async fn register_and_login<S, B>(app: &S, pool: &PgPool, email: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(
        resp.status(),
        StatusCode::CREATED,
        "Setup: failed to register {}",
        email
    );

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "Setup: failed to log in {}", email);
    let body: serde_json::Value = test::read_body_json(resp).await;
    body["access_token"].as_str().unwrap().to_string()
}

#[actix_rt::test]
async fn test_goal_crud_flow() {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let auth_config = test_auth_config();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(TokenService::from_config(&auth_config)))
            .app_data(web::Data::new(auth_config.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    let email = "goal_crud_itest@example.com";
    let token = register_and_login(&app, &pool, email, "Password123!").await;

    // Create
    let req = test::TestRequest::post()
        .uri("/api/goals")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "title": "Learn Rust", "description": "Work through the book" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    let goal_id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], "Learn Rust");
    assert_eq!(created["description"], "Work through the book");

    // List: the new goal is present
    let req = test::TestRequest::get()
        .uri("/api/goals")
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listing: serde_json::Value = test::read_body_json(resp).await;
    assert!(listing
        .as_array()
        .unwrap()
        .iter()
        .any(|g| g["id"].as_i64() == Some(goal_id)));

    // Get by id
    let req = test::TestRequest::get()
        .uri(&format!("/api/goals/{}", goal_id))
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Partial update: only the title changes, the description stays
    let req = test::TestRequest::put()
        .uri(&format!("/api/goals/{}", goal_id))
        .append_header(("Authorization", format!("Bearer {}", token)))
        .set_json(json!({ "title": "Master Rust" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(updated["title"], "Master Rust");
    assert_eq!(updated["description"], "Work through the book");

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/goals/{}", goal_id))
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // Confirm gone
    let req = test::TestRequest::get()
        .uri(&format!("/api/goals/{}", goal_id))
        .append_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(&pool)
        .await;
}

#[actix_rt::test]
async fn test_goal_validation() {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let auth_config = test_auth_config();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(TokenService::from_config(&auth_config)))
            .app_data(web::Data::new(auth_config.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    let email = "goal_validation_itest@example.com";
    let token = register_and_login(&app, &pool, email, "Password123!").await;

    let test_cases = vec![
        (json!({ "title": "ab" }), "title below 3 characters"),
        (json!({ "title": "a".repeat(101) }), "title above 100 characters"),
        (
            json!({ "title": "Valid title", "description": "d".repeat(501) }),
            "description above 500 characters",
        ),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/goals")
            .append_header(("Authorization", format!("Bearer {}", token)))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "Test case failed: {}",
            description
        );
    }

    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(&pool)
        .await;
}

#[actix_rt::test]
async fn test_cross_user_isolation() {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let auth_config = test_auth_config();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(TokenService::from_config(&auth_config)))
            .app_data(web::Data::new(auth_config.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    let email_a = "goal_iso_a_itest@example.com";
    let email_b = "goal_iso_b_itest@example.com";
    let token_a = register_and_login(&app, &pool, email_a, "PasswordAAA1").await;
    let token_b = register_and_login(&app, &pool, email_b, "PasswordBBB1").await;

    // User A creates a goal
    let req = test::TestRequest::post()
        .uri("/api/goals")
        .append_header(("Authorization", format!("Bearer {}", token_a)))
        .set_json(json!({ "title": "A's private goal" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: serde_json::Value = test::read_body_json(resp).await;
    let goal_id = created["id"].as_i64().unwrap();

    // User B cannot fetch, update, or delete it
    let req = test::TestRequest::get()
        .uri(&format!("/api/goals/{}", goal_id))
        .append_header(("Authorization", format!("Bearer {}", token_b)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let foreign_body = test::read_body(resp).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/goals/{}", goal_id))
        .append_header(("Authorization", format!("Bearer {}", token_b)))
        .set_json(json!({ "title": "Hijacked title" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/goals/{}", goal_id))
        .append_header(("Authorization", format!("Bearer {}", token_b)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // B's answer for A's goal is byte-identical to a genuinely absent id
    let req = test::TestRequest::get()
        .uri("/api/goals/999999999")
        .append_header(("Authorization", format!("Bearer {}", token_b)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let absent_body = test::read_body(resp).await;
    assert_eq!(foreign_body, absent_body);

    // B's listing never contains A's goal
    let req = test::TestRequest::get()
        .uri("/api/goals")
        .append_header(("Authorization", format!("Bearer {}", token_b)))
        .to_request();
    let listing: serde_json::Value =
        test::read_body_json(test::call_service(&app, req).await).await;
    assert!(!listing
        .as_array()
        .unwrap()
        .iter()
        .any(|g| g["id"].as_i64() == Some(goal_id)));

    // The goal survived B's attempts, untouched
    let req = test::TestRequest::get()
        .uri(&format!("/api/goals/{}", goal_id))
        .append_header(("Authorization", format!("Bearer {}", token_a)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let goal: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(goal["title"], "A's private goal");

    for email in [email_a, email_b] {
        let _ = sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&pool)
            .await;
    }
}

#[actix_rt::test]
async fn test_goals_require_authentication() {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");

    let auth_config = test_auth_config();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(TokenService::from_config(&auth_config)))
            .app_data(web::Data::new(auth_config.clone()))
            .wrap(Logger::default())
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .configure(routes::config),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/goals").to_request();
    let status = match test::try_call_service(&app, req).await {
        Ok(resp) => resp.status(),
        Err(err) => err.error_response().status(),
    };
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
