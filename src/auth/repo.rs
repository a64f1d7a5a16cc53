use crate::auth::repo_types::User;
use sqlx::SqlitePool;
use time::OffsetDateTime;

impl User {
    /// Find a user by username.
    pub async fn find_by_username(db: &SqlitePool, username: &str) -> sqlx::Result<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
    }

    /// Insert a new user. A taken username surfaces as a unique violation from the store.
    pub async fn create(db: &SqlitePool, username: &str, password_hash: &str) -> sqlx::Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash, created_at)
            VALUES (?, ?, ?)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(OffsetDateTime::now_utc())
        .fetch_one(db)
        .await
    }
}
