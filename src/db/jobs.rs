use chrono::NaiveDate;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::Job;

pub struct NewJob<'a> {
    pub company: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub salary: &'a str,
    pub tags: &'a [String],
    /// Defaults to today when absent.
    pub date_posted: Option<NaiveDate>,
    pub admin_id: i64,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct JobUpdate {
    pub company: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub tags: Option<Vec<String>>,
}

pub async fn list(pool: &PgPool) -> Result<Vec<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs ORDER BY date_posted DESC, id DESC")
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count_all<'e, E: sqlx::PgExecutor<'e>>(executor: E) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM jobs")
        .fetch_one(executor)
        .await?;
    Ok(row.0)
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    job: &NewJob<'_>,
) -> Result<Job, sqlx::Error> {
    sqlx::query_as::<_, Job>(
        "INSERT INTO jobs (company, title, description, location, salary, tags, date_posted, admin_id)
         VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, CURRENT_DATE), $8) RETURNING *",
    )
    .bind(job.company)
    .bind(job.title)
    .bind(job.description)
    .bind(job.location)
    .bind(job.salary)
    .bind(Json(job.tags))
    .bind(job.date_posted)
    .bind(job.admin_id)
    .fetch_one(executor)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: i64,
    update: &JobUpdate,
) -> Result<Option<Job>, sqlx::Error> {
    sqlx::query_as::<_, Job>(
        "UPDATE jobs SET
            company = COALESCE($2, company),
            title = COALESCE($3, title),
            description = COALESCE($4, description),
            location = COALESCE($5, location),
            salary = COALESCE($6, salary),
            tags = COALESCE($7, tags)
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(update.company.as_deref())
    .bind(update.title.as_deref())
    .bind(update.description.as_deref())
    .bind(update.location.as_deref())
    .bind(update.salary.as_deref())
    .bind(update.tags.as_ref().map(Json))
    .fetch_optional(pool)
    .await
}

/// Applications and referrals for the job are removed by cascade.
pub async fn delete<'e, E: sqlx::PgExecutor<'e>>(executor: E, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}
