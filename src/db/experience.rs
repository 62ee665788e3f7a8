use sqlx::PgPool;

use crate::models::Experience;

pub struct ExperienceFields<'a> {
    pub company: &'a str,
    pub position: &'a str,
    pub duration: &'a str,
    pub description: Option<&'a str>,
}

#[derive(Debug, Default)]
pub struct ExperienceUpdate {
    pub company: Option<String>,
    pub position: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Experience>, sqlx::Error> {
    sqlx::query_as::<_, Experience>("SELECT * FROM experiences WHERE user_id = $1 ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    user_id: i64,
    fields: &ExperienceFields<'_>,
) -> Result<Experience, sqlx::Error> {
    sqlx::query_as::<_, Experience>(
        "INSERT INTO experiences (user_id, company, position, duration, description)
         VALUES ($1, $2, $3, $4, $5) RETURNING *",
    )
    .bind(user_id)
    .bind(fields.company)
    .bind(fields.position)
    .bind(fields.duration)
    .bind(fields.description)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    user_id: i64,
    update: &ExperienceUpdate,
) -> Result<Option<Experience>, sqlx::Error> {
    sqlx::query_as::<_, Experience>(
        "UPDATE experiences SET
            company = COALESCE($3, company),
            position = COALESCE($4, position),
            duration = COALESCE($5, duration),
            description = COALESCE($6, description)
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(update.company.as_deref())
    .bind(update.position.as_deref())
    .bind(update.duration.as_deref())
    .bind(update.description.as_deref())
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM experiences WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
