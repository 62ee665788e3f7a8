use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::{Application, ApplicationDetail, ApplicationStatus};

const DETAIL_SELECT: &str = "SELECT a.id, a.job_id, j.title AS job_title, a.user_id,
        u.email AS user_email, a.resume_path, a.status, a.created_at
     FROM applications a
     JOIN jobs j ON j.id = a.job_id
     JOIN users u ON u.id = a.user_id";

pub async fn create(
    pool: &PgPool,
    user_id: i64,
    job_id: i64,
    resume_path: &str,
) -> Result<Application, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        "INSERT INTO applications (user_id, job_id, resume_path, status)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(user_id)
    .bind(job_id)
    .bind(resume_path)
    .bind(ApplicationStatus::Pending.as_str())
    .fetch_one(pool)
    .await
}

pub async fn list_detailed(pool: &PgPool) -> Result<Vec<ApplicationDetail>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationDetail>(&format!("{DETAIL_SELECT} ORDER BY a.created_at DESC, a.id DESC"))
        .fetch_all(pool)
        .await
}

pub async fn list_for_job(pool: &PgPool, job_id: i64) -> Result<Vec<ApplicationDetail>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationDetail>(&format!(
        "{DETAIL_SELECT} WHERE a.job_id = $1 ORDER BY a.created_at DESC, a.id DESC"
    ))
    .bind(job_id)
    .fetch_all(pool)
    .await
}

pub async fn list_for_user(pool: &PgPool, user_id: i64) -> Result<Vec<ApplicationDetail>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationDetail>(&format!(
        "{DETAIL_SELECT} WHERE a.user_id = $1 ORDER BY a.created_at DESC, a.id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn update_status(
    pool: &PgPool,
    id: i64,
    status: ApplicationStatus,
) -> Result<Option<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        "UPDATE applications SET status = $2 WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await
}

/// Delete an application only if it belongs to `user_id`.
pub async fn delete_for_user(
    pool: &PgPool,
    id: i64,
    user_id: i64,
) -> Result<Option<Application>, sqlx::Error> {
    sqlx::query_as::<_, Application>(
        "DELETE FROM applications WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Applications created on `day` (UTC).
pub async fn count_created_on(pool: &PgPool, day: NaiveDate) -> Result<i64, sqlx::Error> {
    let row: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM applications WHERE (created_at AT TIME ZONE 'UTC')::date = $1",
    )
    .bind(day)
    .fetch_one(pool)
    .await?;
    Ok(row.0)
}

pub async fn resume_paths_for_job<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    job_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT resume_path FROM applications WHERE job_id = $1")
        .bind(job_id)
        .fetch_all(executor)
        .await
}

pub async fn resume_paths_for_user<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: i64,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT resume_path FROM applications WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(executor)
        .await
}

/// Re-applying to a job reuses the same stored file name.
pub async fn resume_in_use(pool: &PgPool, resume_path: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM applications WHERE resume_path = $1)")
        .bind(resume_path)
        .fetch_one(pool)
        .await
}
