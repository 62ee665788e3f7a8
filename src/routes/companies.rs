use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use bytes::Bytes;
use chrono::Utc;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::extract::PathParam;
use crate::models::{Company, CompanyChanges};
use crate::state::SharedState;
use crate::upload::parser::{self, FormData};
use crate::upload::storage;

fn not_found() -> AppError {
    AppError::NotFound("Company not found".to_string())
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Company>>, AppError> {
    Ok(Json(state.companies.list().await?))
}

pub async fn get(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Company>, AppError> {
    let company = state.companies.get(id).await?.ok_or_else(not_found)?;
    Ok(Json(company))
}

pub async fn create(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let form = parser::parse_form(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;

    let mut changes = CompanyChanges::from_form(&form.fields);
    if changes.name.as_deref().is_none_or(str::is_empty) {
        return Err(AppError::BadRequest("Company name is required".to_string()));
    }
    changes.logo_url = save_logo(&state, &form).await?;

    let company = state.companies.create(changes).await?;
    tracing::info!(company_id = company.id, store = state.companies.kind(), "Company created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Company created successfully", "company": company })),
    ))
}

pub async fn update(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let form = parser::parse_form(&headers, body)
        .await
        .map_err(AppError::BadRequest)?;

    let mut changes = CompanyChanges::from_form(&form.fields);
    if changes.name.as_deref() == Some("") {
        return Err(AppError::BadRequest("Company name cannot be empty".to_string()));
    }
    if state.companies.get(id).await?.is_none() {
        return Err(not_found());
    }
    changes.logo_url = save_logo(&state, &form).await?;

    let company = state
        .companies
        .update(id, changes)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(json!({ "message": "Company updated successfully", "company": company })))
}

pub async fn delete(
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, AppError> {
    if !state.companies.delete(id).await? {
        return Err(not_found());
    }
    tracing::info!(company_id = id, "Company deleted");
    Ok(super::message("Company deleted successfully"))
}

/// Store an attached `logo` file and return its public path.
async fn save_logo(state: &SharedState, form: &FormData) -> Result<Option<String>, AppError> {
    let Some(logo) = form.files.get("logo").filter(|f| !f.filename.trim().is_empty()) else {
        return Ok(None);
    };

    let name = format!(
        "company_{}_{}",
        Utc::now().timestamp_millis(),
        storage::sanitize_filename(&logo.filename)
    );
    let path = state
        .uploads
        .save(&name, &logo.data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store logo: {e}")))?;
    Ok(Some(path))
}
