use crate::{
    auth::{
        hash_password, normalize_email, verify_password, CurrentUser, LoginRequest,
        RegisterRequest, TokenResponse, TokenService, MAX_PASSWORD_BYTES,
    },
    error::AppError,
    models::User,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account. The email is trimmed and lowercased before
/// the uniqueness check, so duplicates are caught case-insensitively.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    let email = normalize_email(&register_data.email);

    // bcrypt limit is 72 bytes (NOT characters); reject up front with a
    // readable message rather than letting the hash step fail obscurely.
    if register_data.password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::BadRequest(format!(
            "Password must be {} bytes or fewer (use a shorter password; avoid long passphrases/emojis)",
            MAX_PASSWORD_BYTES
        )));
    }

    // Check if email already exists
    let existing_user = sqlx::query_as::<_, (i32,)>("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&**pool)
        .await?;

    if existing_user.is_some() {
        return Err(AppError::BadRequest("Email already registered".into()));
    }

    // Hash password
    let password_hash = hash_password(&register_data.password)?;

    // Insert new user
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (email, password_hash) VALUES ($1, $2)
         RETURNING id, email, created_at",
    )
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(user))
}

/// Login user
///
/// Authenticates a user and returns a bearer access token. An unknown email
/// and a wrong password produce the same answer; this endpoint never reveals
/// which half of the credentials was bad.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    login_data.validate()?;

    let email = normalize_email(&login_data.email);

    // Get user from database
    let user = sqlx::query_as::<_, (i32, String)>(
        "SELECT id, password_hash FROM users WHERE email = $1",
    )
    .bind(&email)
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some((user_id, password_hash)) => {
            // Verify password
            if verify_password(&login_data.password, &password_hash)? {
                let token = tokens.generate_default(user_id)?;
                Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
            } else {
                Err(AppError::Unauthorized("Invalid email or password".into()))
            }
        }
        None => Err(AppError::Unauthorized("Invalid email or password".into())),
    }
}

/// Current user profile
///
/// Returns the account record for the identity resolved from the bearer
/// token.
#[get("/me")]
pub async fn me(user: CurrentUser) -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().json(user.0))
}
