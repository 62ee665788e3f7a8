use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::experience::{ExperienceFields, ExperienceUpdate};
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::models::Experience;
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
pub struct ExperienceRequest {
    pub company: Option<String>,
    pub position: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Experience>>, AppError> {
    let rows = db::experience::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(rows))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<ExperienceRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let company = validate::required(req.company, "company")?;
    let position = validate::required(req.position, "position")?;
    let duration = validate::required(req.duration, "duration")?;
    let description = validate::optional(req.description);

    let row = db::experience::create(
        &state.pool,
        auth.user_id,
        &ExperienceFields {
            company: &company,
            position: &position,
            duration: &duration,
            description: description.as_deref(),
        },
    )
    .await?;

    Ok(super::created("Experience added successfully", row.id))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<ExperienceRequest>,
) -> Result<Json<Value>, AppError> {
    let changes = ExperienceUpdate {
        company: validate::optional(req.company),
        position: validate::optional(req.position),
        duration: validate::optional(req.duration),
        description: validate::optional(req.description),
    };

    db::experience::update(&state.pool, id, auth.user_id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound("Experience not found".to_string()))?;

    Ok(super::message("Experience updated successfully"))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, AppError> {
    if !db::experience::delete(&state.pool, id, auth.user_id).await? {
        return Err(AppError::NotFound("Experience not found".to_string()));
    }
    Ok(super::message("Experience deleted successfully"))
}
