use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

use super::dto::MeasurementInput;

/// One body-measurement entry. Every query below is scoped by `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: i64,
    pub user_id: i64,
    pub date: String, // YYYY-MM-DD
    pub weight: f64,
    pub chest: f64,
    pub waist: f64,
    pub arm: f64,
    pub leg: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

pub async fn list_by_user(db: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<Measurement>> {
    sqlx::query_as::<_, Measurement>(
        r#"
        SELECT id, user_id, date, weight, chest, waist, arm, leg, created_at
        FROM measurements
        WHERE user_id = ?
        ORDER BY date DESC, id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
}

pub async fn create(
    db: &SqlitePool,
    user_id: i64,
    input: &MeasurementInput,
) -> sqlx::Result<Measurement> {
    sqlx::query_as::<_, Measurement>(
        r#"
        INSERT INTO measurements (user_id, date, weight, chest, waist, arm, leg, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, user_id, date, weight, chest, waist, arm, leg, created_at
        "#,
    )
    .bind(user_id)
    .bind(&input.date)
    .bind(input.weight)
    .bind(input.chest)
    .bind(input.waist)
    .bind(input.arm)
    .bind(input.leg)
    .bind(OffsetDateTime::now_utc())
    .fetch_one(db)
    .await
}

/// `None` when no row matches both `id` and `user_id`.
pub async fn update(
    db: &SqlitePool,
    user_id: i64,
    id: i64,
    input: &MeasurementInput,
) -> sqlx::Result<Option<Measurement>> {
    sqlx::query_as::<_, Measurement>(
        r#"
        UPDATE measurements
           SET date = ?, weight = ?, chest = ?, waist = ?, arm = ?, leg = ?
         WHERE id = ? AND user_id = ?
        RETURNING id, user_id, date, weight, chest, waist, arm, leg, created_at
        "#,
    )
    .bind(&input.date)
    .bind(input.weight)
    .bind(input.chest)
    .bind(input.waist)
    .bind(input.arm)
    .bind(input.leg)
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
}

/// Returns whether a row owned by `user_id` was deleted.
pub async fn delete(db: &SqlitePool, user_id: i64, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM measurements WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected() > 0)
}
