use sqlx::PgPool;

use crate::models::Project;

pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE user_id = $1 ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    user_id: i64,
    title: &str,
    description: Option<&str>,
    technologies: &[String],
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "INSERT INTO projects (user_id, title, description, technologies)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(user_id)
    .bind(title)
    .bind(description)
    .bind(technologies)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    user_id: i64,
    title: Option<&str>,
    description: Option<&str>,
    technologies: Option<&[String]>,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        "UPDATE projects SET
            title = COALESCE($3, title),
            description = COALESCE($4, description),
            technologies = COALESCE($5, technologies)
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(description)
    .bind(technologies)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
