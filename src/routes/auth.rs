use crate::{
    auth::{
        create_session, generate_token, hash_password, verify_password, LoginRequest,
        LoginResponse, RegisterRequest,
    },
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Register a new user
///
/// Creates a new user account. The email must not belong to any live account;
/// comparison is against the trimmed value, ignoring soft-deleted rows.
#[post("/register")]
pub async fn register(
    pool: web::Data<PgPool>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input
    register_data.validate()?;

    // Check if a live user already holds this email
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT count(id) > 0 FROM users \
         WHERE email = TRIM($1) AND archived_at IS NULL",
    )
    .bind(&register_data.email)
    .fetch_one(&**pool)
    .await?;

    if exists {
        return Err(AppError::Conflict("user already exists".into()));
    }

    // Hash password
    let password_hash = hash_password(&register_data.password)?;

    // Insert new user; name and email are stored trimmed
    sqlx::query(
        "INSERT INTO users (name, email, password) \
         VALUES (TRIM($1), TRIM($2), $3)",
    )
    .bind(&register_data.name)
    .bind(&register_data.email)
    .bind(&password_hash)
    .execute(&**pool)
    .await?;

    log::info!("registered new user");

    Ok(HttpResponse::Created().json(json!({
        "message": "user created successfully"
    })))
}

/// Login user
///
/// Authenticates a user, records a new login session and returns a token
/// referencing it. Logins are additive: earlier sessions stay valid until
/// they are individually logged out.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    // Validate input; the password length check runs before any storage access
    login_data.validate()?;

    // Get the live user for this email, if any
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password, archived_at FROM users \
         WHERE archived_at IS NULL AND email = TRIM($1)",
    )
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    // Unknown email and wrong password are deliberately indistinguishable.
    let user = match user {
        Some(user) => user,
        None => return Err(AppError::NotFound("user not found".into())),
    };

    if !verify_password(&login_data.password, &user.password)? {
        return Err(AppError::NotFound("user not found".into()));
    }

    let session_id = create_session(&pool, user.id).await?;
    let token = generate_token(user.id, &user.name, &user.email, session_id)?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "user logged in successfully".to_string(),
        token,
    }))
}
