use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::models::Skill;
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
pub struct SkillRequest {
    pub name: Option<String>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Skill>>, AppError> {
    let skills = db::skills::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(skills))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<SkillRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let name = validate::required(req.name, "name")?;
    let skill = db::skills::create(&state.pool, auth.user_id, &name).await?;
    Ok(super::created("Skill added successfully", skill.id))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<SkillRequest>,
) -> Result<Json<Value>, AppError> {
    let name = validate::required(req.name, "name")?;
    db::skills::rename(&state.pool, id, auth.user_id, &name)
        .await?
        .ok_or_else(|| AppError::NotFound("Skill not found".to_string()))?;
    Ok(super::message("Skill updated successfully"))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, AppError> {
    if !db::skills::delete(&state.pool, id, auth.user_id).await? {
        return Err(AppError::NotFound("Skill not found".to_string()));
    }
    Ok(super::message("Skill deleted successfully"))
}
