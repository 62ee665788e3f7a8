use sqlx::PgPool;

use crate::models::Education;

pub struct EducationFields<'a> {
    pub degree: &'a str,
    pub field: &'a str,
    pub institution: &'a str,
    pub year: &'a str,
    pub grade: Option<&'a str>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct EducationUpdate {
    pub degree: Option<String>,
    pub field: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
    pub grade: Option<String>,
}

pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<Education>, sqlx::Error> {
    sqlx::query_as::<_, Education>("SELECT * FROM educations WHERE user_id = $1 ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    user_id: i64,
    fields: &EducationFields<'_>,
) -> Result<Education, sqlx::Error> {
    sqlx::query_as::<_, Education>(
        "INSERT INTO educations (user_id, degree, field, institution, year, grade)
         VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
    )
    .bind(user_id)
    .bind(fields.degree)
    .bind(fields.field)
    .bind(fields.institution)
    .bind(fields.year)
    .bind(fields.grade)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    user_id: i64,
    update: &EducationUpdate,
) -> Result<Option<Education>, sqlx::Error> {
    sqlx::query_as::<_, Education>(
        "UPDATE educations SET
            degree = COALESCE($3, degree),
            field = COALESCE($4, field),
            institution = COALESCE($5, institution),
            year = COALESCE($6, year),
            grade = COALESCE($7, grade)
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(update.degree.as_deref())
    .bind(update.field.as_deref())
    .bind(update.institution.as_deref())
    .bind(update.year.as_deref())
    .bind(update.grade.as_deref())
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64, user_id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM educations WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
