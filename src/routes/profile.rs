use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::{Education, Experience, Project, Skill, User};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct UpdateProfile {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub resume_headline: Option<String>,
}

/// The caller's account with every profile section attached.
#[derive(Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: User,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let (education, experience, skills, projects) = tokio::try_join!(
        db::education::list_for_user(&state.pool, auth.user_id),
        db::experience::list_for_user(&state.pool, auth.user_id),
        db::skills::list_for_user(&state.pool, auth.user_id),
        db::projects::list_for_user(&state.pool, auth.user_id),
    )?;

    Ok(Json(ProfileResponse {
        user,
        education,
        experience,
        skills,
        projects,
    }))
}

/// Omitted fields keep their stored value; an empty string blanks one.
pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<UpdateProfile>,
) -> Result<Json<Value>, AppError> {
    let trim = |v: Option<String>| v.map(|s| s.trim().to_string());
    let changes = db::users::ProfileUpdate {
        full_name: trim(req.full_name),
        phone: trim(req.phone),
        location: trim(req.location),
        resume_headline: trim(req.resume_headline),
    };

    db::users::update_profile(&state.pool, auth.user_id, &changes)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(super::message("Profile updated successfully"))
}
