use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::ListInput;
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::models::Project;
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
pub struct ProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub technologies: Option<ListInput>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Project>>, AppError> {
    let projects = db::projects::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(projects))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<ProjectRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let title = validate::required(req.title, "title")?;
    let description = validate::optional(req.description);
    let technologies = req
        .technologies
        .map(ListInput::into_vec)
        .unwrap_or_default();

    let project = db::projects::create(
        &state.pool,
        auth.user_id,
        &title,
        description.as_deref(),
        &technologies,
    )
    .await?;

    Ok(super::created("Project added successfully", project.id))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<ProjectRequest>,
) -> Result<Json<Value>, AppError> {
    let title = validate::optional(req.title);
    let description = validate::optional(req.description);
    let technologies = req.technologies.map(ListInput::into_vec);

    db::projects::update(
        &state.pool,
        id,
        auth.user_id,
        title.as_deref(),
        description.as_deref(),
        technologies.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("Project not found".to_string()))?;

    Ok(super::message("Project updated successfully"))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, AppError> {
    if !db::projects::delete(&state.pool, id, auth.user_id).await? {
        return Err(AppError::NotFound("Project not found".to_string()));
    }
    Ok(super::message("Project deleted successfully"))
}
