use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A full user row as stored in the `users` table.
///
/// The password hash never leaves the server; it is skipped during serialization.
/// `archived_at` implements soft delete: a user is live iff it is `None`.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub archived_at: Option<DateTime<Utc>>,
}

/// The public projection of a user returned by the profile endpoint.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
