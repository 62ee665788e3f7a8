use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::models::{ApplicationDetail, ApplicationStatus};
use crate::state::SharedState;
use crate::upload::{parser, storage};

#[derive(Deserialize)]
pub struct UpdateStatus {
    pub status: Option<String>,
}

/// Multipart body with a `resume` PDF and a `job_id` field.
pub async fn apply(
    auth: AuthUser,
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let form = parser::parse_form(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;

    let resume = form
        .files
        .get("resume")
        .ok_or_else(|| AppError::BadRequest("No resume file provided".to_string()))?;
    if resume.filename.trim().is_empty() {
        return Err(AppError::BadRequest("No selected file".to_string()));
    }
    // Sanitizing can strip a leading-dot extension such as `..pdf`.
    if !storage::is_pdf(&storage::sanitize_filename(&resume.filename)) {
        return Err(AppError::BadRequest("Only PDF files are allowed".to_string()));
    }

    let job_id: i64 = form
        .field("job_id")
        .ok_or_else(|| AppError::BadRequest("Job ID is required".to_string()))?
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid job ID".to_string()))?;

    if db::jobs::find_by_id(&state.pool, job_id).await?.is_none() {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    let name = storage::resume_name(auth.user_id, job_id, &resume.filename);
    let resume_path = state
        .uploads
        .save(&name, &resume.data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store resume: {e}")))?;

    let application = match db::applications::create(&state.pool, auth.user_id, job_id, &resume_path).await {
        Ok(application) => application,
        Err(e) => {
            let in_use = db::applications::resume_in_use(&state.pool, &resume_path)
                .await
                .unwrap_or(true);
            if !in_use {
                state.uploads.remove_all([&resume_path]).await;
            }
            return Err(match e {
                // The job vanished between the lookup and the insert.
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::NotFound("Job not found".to_string())
                }
                _ => AppError::Database(e),
            });
        }
    };

    tracing::info!(
        application_id = application.id,
        user_id = auth.user_id,
        job_id,
        "Application submitted"
    );

    Ok(super::created("Application submitted successfully", application.id))
}

pub async fn list_all(
    State(state): State<SharedState>,
) -> Result<Json<Vec<ApplicationDetail>>, AppError> {
    let applications = db::applications::list_detailed(&state.pool).await?;
    Ok(Json(applications))
}

pub async fn update_status(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<UpdateStatus>,
) -> Result<Json<Value>, AppError> {
    let raw = req
        .status
        .ok_or_else(|| AppError::BadRequest("Status is required".to_string()))?;
    let status = ApplicationStatus::parse(&raw).ok_or_else(|| {
        let allowed: Vec<&str> = ApplicationStatus::ALL.iter().map(|s| s.as_str()).collect();
        AppError::BadRequest(format!("Status must be one of: {}", allowed.join(", ")))
    })?;

    db::applications::update_status(&state.pool, id, status)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    Ok(super::message("Application status updated successfully"))
}

/// Applications received since midnight UTC.
pub async fn count_today(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let today = Utc::now().date_naive();
    let count = db::applications::count_created_on(&state.pool, today).await?;
    Ok(Json(json!({ "count": count })))
}

pub async fn mine(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<ApplicationDetail>>, AppError> {
    let applications = db::applications::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(applications))
}

pub async fn withdraw(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, AppError> {
    let application = db::applications::delete_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    if !db::applications::resume_in_use(&state.pool, &application.resume_path).await? {
        state.uploads.remove_all([&application.resume_path]).await;
    }

    Ok(super::message("Application withdrawn successfully"))
}
