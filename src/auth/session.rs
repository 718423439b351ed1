//! Server-side login sessions.
//!
//! Every successful login inserts a `user_session` row, and the issued token
//! carries that row's id. A session is valid exactly while `archived_at IS NULL`,
//! which makes tokens revocable independently of their embedded expiry: logout
//! archives the row and the auth gate rejects the token on the next request.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Outcome of a session validity lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// The session exists and has not been archived.
    Active,
    /// The session was archived by a logout or account deletion.
    Revoked,
    /// No row with this id. A verified token referencing a missing session is
    /// a data anomaly; callers must treat it as unauthorized, not as a fault.
    NotFound,
}

/// Creates a new session row for a user and returns its id.
///
/// Logins are additive: creating a session never touches the user's other
/// active sessions.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<Uuid, AppError> {
    let session_id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO user_session (user_id) VALUES ($1) RETURNING id",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(session_id)
}

/// Looks up the validity of a session by id.
///
/// Infrastructure faults propagate as `AppError::DatabaseError`; a missing row
/// is reported as `SessionStatus::NotFound`, never as an error.
pub async fn session_status(pool: &PgPool, session_id: Uuid) -> Result<SessionStatus, AppError> {
    let archived_at = sqlx::query_scalar::<_, Option<DateTime<Utc>>>(
        "SELECT archived_at FROM user_session WHERE id = $1",
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(match archived_at {
        None => SessionStatus::NotFound,
        Some(None) => SessionStatus::Active,
        Some(Some(_)) => SessionStatus::Revoked,
    })
}

/// Revokes a session by archiving it. Already-archived sessions are left untouched.
pub async fn revoke_session(pool: &PgPool, session_id: Uuid) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE user_session SET archived_at = NOW() \
         WHERE id = $1 AND archived_at IS NULL",
    )
    .bind(session_id)
    .execute(pool)
    .await?;

    Ok(())
}
