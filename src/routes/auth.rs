use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::jwt::{Claims, encode_token};
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::models::{Role, User};
use crate::state::SharedState;
use crate::validate;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub is_admin: bool,
    pub role: Role,
}

#[derive(Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
}

/// Self-registration always creates a regular user; any admin flag in the
/// body is ignored.
pub async fn register(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let email = validate::required(req.email, "email")?.to_lowercase();
    let password = req
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required field: password".to_string()))?;

    if !validate::is_valid_email(&email) {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    password::check_strength(&password).map_err(AppError::BadRequest)?;

    if db::users::find_by_email(&state.pool, &email).await?.is_some() {
        return Err(AppError::BadRequest("Email already registered".to_string()));
    }

    let password_hash = password::hash(&password).map_err(AppError::Internal)?;
    let full_name = validate::optional(req.full_name);
    let phone = validate::optional(req.phone);
    let location = validate::optional(req.location);

    let user = db::users::create(
        &state.pool,
        &db::users::NewUser {
            email: &email,
            password_hash: &password_hash,
            role: Role::User,
            full_name: full_name.as_deref(),
            phone: phone.as_deref(),
            location: location.as_deref(),
        },
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::BadRequest("Email already registered".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(user_id = user.id, "User registered");

    Ok(super::created("User registered successfully", user.id))
}

pub async fn login(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = authenticate(&state, req).await?;
    let role = user.role();

    let access_token = issue_token(&state, &user)?;
    Ok(Json(LoginResponse {
        access_token,
        is_admin: role.is_admin(),
        role,
    }))
}

/// Same credential check as `login`, but only admins receive a token.
pub async fn admin_login(
    State(state): State<SharedState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    let user = authenticate(&state, req).await?;

    if !user.role().is_admin() {
        tracing::warn!(user_id = user.id, "Non-admin attempted admin login");
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = issue_token(&state, &user)?;
    Ok(Json(AdminLoginResponse { token }))
}

async fn authenticate(state: &SharedState, req: LoginRequest) -> Result<User, AppError> {
    let (Some(email), Some(password)) = (validate::optional(req.email), req.password) else {
        return Err(AppError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    if state.login_limiter.check(&email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let Some(user) = db::users::find_by_email(&state.pool, &email).await? else {
        state.login_limiter.record_failure(&email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    };

    let valid = password::verify(&password, &user.password_hash).map_err(AppError::Internal)?;
    if !valid {
        state.login_limiter.record_failure(&email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    state.login_limiter.reset(&email);
    Ok(user)
}

fn issue_token(state: &SharedState, user: &User) -> Result<String, AppError> {
    let claims = Claims::new(user.id, user.role(), state.config.token_ttl_minutes);
    encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)
}
