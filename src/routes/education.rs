use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::db::education::{EducationFields, EducationUpdate};
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::models::Education;
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
pub struct EducationRequest {
    pub degree: Option<String>,
    pub field: Option<String>,
    pub institution: Option<String>,
    pub year: Option<String>,
    pub grade: Option<String>,
}

fn not_found() -> AppError {
    AppError::NotFound("Education not found".to_string())
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Education>>, AppError> {
    let rows = db::education::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(rows))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<EducationRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let degree = validate::required(req.degree, "degree")?;
    let field = validate::required(req.field, "field")?;
    let institution = validate::required(req.institution, "institution")?;
    let year = validate::required(req.year, "year")?;
    let grade = validate::optional(req.grade);

    let row = db::education::create(
        &state.pool,
        auth.user_id,
        &EducationFields {
            degree: &degree,
            field: &field,
            institution: &institution,
            year: &year,
            grade: grade.as_deref(),
        },
    )
    .await?;

    Ok(super::created("Education added successfully", row.id))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<EducationRequest>,
) -> Result<Json<Value>, AppError> {
    let changes = EducationUpdate {
        degree: validate::optional(req.degree),
        field: validate::optional(req.field),
        institution: validate::optional(req.institution),
        year: validate::optional(req.year),
        grade: validate::optional(req.grade),
    };

    db::education::update(&state.pool, id, auth.user_id, &changes)
        .await?
        .ok_or_else(not_found)?;

    Ok(super::message("Education updated successfully"))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, AppError> {
    if !db::education::delete(&state.pool, id, auth.user_id).await? {
        return Err(not_found());
    }
    Ok(super::message("Education deleted successfully"))
}
