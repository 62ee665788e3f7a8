use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::{JsonBody, PathParam};
use crate::models::{Role, User};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SetRole {
    pub role: Option<String>,
}

pub async fn list_users(State(state): State<SharedState>) -> Result<Json<Vec<User>>, AppError> {
    let users = db::users::list_all(&state.pool).await?;
    Ok(Json(users))
}

pub async fn set_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
    JsonBody(req): JsonBody<SetRole>,
) -> Result<Json<Value>, AppError> {
    let role = req
        .role
        .as_deref()
        .and_then(Role::parse)
        .ok_or_else(|| {
            AppError::BadRequest("Role must be one of: user, admin, super_admin".to_string())
        })?;

    if id == auth.user_id {
        return Err(AppError::BadRequest("Cannot change your own role".to_string()));
    }

    let user = db::users::set_role(&state.pool, id, role)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = id, role = role.as_str(), changed_by = auth.user_id, "User role changed");

    Ok(Json(json!({ "message": "Role updated successfully", "user": user })))
}

/// Removes the account with its profile, applications and referrals. Users
/// who still own job postings must have them deleted first.
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<SharedState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, AppError> {
    if id == auth.user_id {
        return Err(AppError::BadRequest("Cannot delete your own account".to_string()));
    }

    let mut tx = state.pool.begin().await?;
    let resumes = db::applications::resume_paths_for_user(&mut *tx, id).await?;
    let deleted = db::users::delete(&mut *tx, id).await.map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::Conflict("User still owns job postings".to_string())
        }
        _ => AppError::Database(e),
    })?;
    if !deleted {
        return Err(AppError::NotFound("User not found".to_string()));
    }
    tx.commit().await?;

    state.uploads.remove_all(&resumes).await;
    tracing::info!(user_id = id, deleted_by = auth.user_id, "User deleted");

    Ok(super::message("User deleted successfully"))
}

/// Files currently in the upload directory.
pub async fn uploads_count(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let count = state
        .uploads
        .count_files()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to read upload directory: {e}")))?;
    Ok(Json(json!({ "count": count })))
}
