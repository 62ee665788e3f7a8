use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::ListInput;
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::models::{ApplicationDetail, Job};
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
pub struct CreateJob {
    pub company: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub tags: Option<ListInput>,
    /// `YYYY-MM-DD`; today when omitted.
    pub date_posted: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateJob {
    pub company: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<String>,
    pub tags: Option<ListInput>,
}

/// Applicant entry in a job's application list.
#[derive(Serialize)]
pub struct JobApplicant {
    pub id: i64,
    pub user: ApplicantRef,
    pub resume_path: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct ApplicantRef {
    pub id: i64,
    pub email: String,
}

impl From<ApplicationDetail> for JobApplicant {
    fn from(a: ApplicationDetail) -> Self {
        Self {
            id: a.id,
            user: ApplicantRef {
                id: a.user_id,
                email: a.user_email,
            },
            resume_path: a.resume_path,
            status: a.status,
            created_at: a.created_at,
        }
    }
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let jobs = db::jobs::list(&state.pool).await?;
    Ok(Json(json!({ "jobs": jobs })))
}

pub async fn get(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Job>, AppError> {
    let job = db::jobs::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;
    Ok(Json(job))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateJob>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let company = validate::required(req.company, "company")?;
    let title = validate::required(req.title, "title")?;
    let description = validate::required(req.description, "description")?;
    let location = validate::required(req.location, "location")?;
    let salary = validate::required(req.salary, "salary")?;
    let tags = req.tags.map(ListInput::into_vec).unwrap_or_default();
    let date_posted = validate::optional(req.date_posted)
        .map(|d| {
            NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                .map_err(|_| AppError::BadRequest("date_posted must be YYYY-MM-DD".to_string()))
        })
        .transpose()?;

    // Tokens outlive role changes; the poster must still be an admin.
    let poster = db::users::find_by_id(&state.pool, auth.user_id).await?;
    if !poster.is_some_and(|u| u.role().is_admin()) {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }

    let job = db::jobs::create(
        &state.pool,
        &db::jobs::NewJob {
            company: &company,
            title: &title,
            description: &description,
            location: &location,
            salary: &salary,
            tags: &tags,
            date_posted,
            admin_id: auth.user_id,
        },
    )
    .await?;

    tracing::info!(job_id = job.id, admin_id = auth.user_id, "Job posted");

    Ok(super::created("Job created successfully", job.id))
}

pub async fn update(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<UpdateJob>,
) -> Result<Json<Value>, AppError> {
    let changes = db::jobs::JobUpdate {
        company: validate::optional(req.company),
        title: validate::optional(req.title),
        description: validate::optional(req.description),
        location: validate::optional(req.location),
        salary: validate::optional(req.salary),
        tags: req.tags.map(ListInput::into_vec),
    };

    db::jobs::update(&state.pool, id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    Ok(super::message("Job updated successfully"))
}

/// Removes the job with its applications and referrals, then the resume
/// files those applications pointed at.
pub async fn delete(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, AppError> {
    let mut tx = state.pool.begin().await?;

    let resumes = db::applications::resume_paths_for_job(&mut *tx, id).await?;
    if !db::jobs::delete(&mut *tx, id).await? {
        return Err(AppError::NotFound("Job not found".to_string()));
    }
    tx.commit().await?;

    state.uploads.remove_all(&resumes).await;
    tracing::info!(job_id = id, removed_resumes = resumes.len(), "Job deleted");

    Ok(super::message("Job and related records deleted successfully"))
}

pub async fn applications(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Vec<JobApplicant>>, AppError> {
    if db::jobs::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    let applicants = db::applications::list_for_job(&state.pool, id)
        .await?
        .into_iter()
        .map(JobApplicant::from)
        .collect();
    Ok(Json(applicants))
}
