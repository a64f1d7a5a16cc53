use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

/// User record in the database.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,                    // unique user ID
    pub username: String,           // unique, immutable
    #[serde(skip_serializing)]
    pub password_hash: String,      // Argon2 PHC string, never exposed
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime, // creation timestamp
}
