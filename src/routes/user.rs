use crate::{
    auth::{revoke_session, CurrentUser},
    error::AppError,
    models::UserProfile,
};
use actix_web::{delete, get, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

/// Returns the profile of the authenticated user.
#[get("/profile")]
pub async fn profile(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let profile = sqlx::query_as::<_, UserProfile>(
        "SELECT id, name, email FROM users WHERE id = $1",
    )
    .bind(user.user_id)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(profile))
}

/// Logs out the authenticated user by revoking the session referenced by the
/// presented token. Other concurrent sessions of the same user are untouched.
#[post("/logout")]
pub async fn logout(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    revoke_session(&pool, user.session_id).await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "user logged out successfully"
    })))
}

/// Soft-deletes the authenticated user's account, then revokes the session.
///
/// The two statements are not atomic. If the second fails the user row is
/// already archived, which still reads consistently: subsequent logins fail,
/// and the surviving session is rejected once its token expires or is
/// logged out.
#[delete("/delete-account")]
pub async fn delete_account(
    pool: web::Data<PgPool>,
    user: CurrentUser,
) -> Result<impl Responder, AppError> {
    sqlx::query(
        "UPDATE users SET archived_at = NOW() \
         WHERE id = $1 AND archived_at IS NULL",
    )
    .bind(user.user_id)
    .execute(&**pool)
    .await?;

    revoke_session(&pool, user.session_id).await?;

    log::info!("account deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": "account deleted successfully"
    })))
}
