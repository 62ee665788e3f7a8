use sqlx::PgPool;

use crate::models::Skill;

pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Skill>, sqlx::Error> {
    sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE user_id = $1 ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn create(pool: &PgPool, user_id: i64, name: &str) -> Result<Skill, sqlx::Error> {
    sqlx::query_as::<_, Skill>("INSERT INTO skills (user_id, name) VALUES ($1, $2) RETURNING *")
        .bind(user_id)
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn rename(
    pool: &PgPool,
    id: i64,
    user_id: i64,
    name: &str,
) -> Result<Option<Skill>, sqlx::Error> {
    sqlx::query_as::<_, Skill>(
        "UPDATE skills SET name = $3 WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM skills WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
