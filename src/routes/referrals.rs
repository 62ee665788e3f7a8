use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::IdInput;
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::Referral;
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
pub struct CreateReferral {
    pub job_id: Option<IdInput>,
    pub referee_email: Option<String>,
    pub message: Option<String>,
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<CreateReferral>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (Some(job_id), Some(referee_email)) = (req.job_id, validate::optional(req.referee_email))
    else {
        return Err(AppError::BadRequest(
            "Job ID and referee email are required".to_string(),
        ));
    };
    let job_id = job_id
        .parse()
        .ok_or_else(|| AppError::BadRequest("Invalid job ID".to_string()))?;

    if !validate::is_valid_email(&referee_email) {
        return Err(AppError::BadRequest("Invalid referee email".to_string()));
    }

    if db::jobs::find_by_id(&state.pool, job_id).await?.is_none() {
        return Err(AppError::NotFound("Job not found".to_string()));
    }

    let message = req.message.unwrap_or_default();
    let referral = db::referrals::create(
        &state.pool,
        job_id,
        auth.user_id,
        &referee_email,
        message.trim(),
    )
    .await?;

    tracing::info!(referral_id = referral.id, job_id, referrer_id = auth.user_id, "Referral created");

    Ok(super::created("Referral submitted successfully", referral.id))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Referral>>, AppError> {
    let referrals = db::referrals::list(&state.pool).await?;
    Ok(Json(referrals))
}
