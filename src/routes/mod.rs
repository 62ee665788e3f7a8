pub mod admin;
pub mod applications;
pub mod auth;
pub mod companies;
pub mod education;
pub mod experience;
pub mod jobs;
pub mod profile;
pub mod projects;
pub mod referrals;
pub mod skills;

use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::middleware::authorize;
use crate::state::SharedState;

pub fn api_routes(state: &SharedState) -> Router<SharedState> {
    let authenticated = from_fn_with_state(state.clone(), authorize::require_auth);
    let applicant = from_fn_with_state(state.clone(), authorize::require_applicant);
    let admin = from_fn_with_state(state.clone(), authorize::require_admin);
    let super_admin = from_fn_with_state(state.clone(), authorize::require_super_admin);

    let public = Router::new()
        .route("/api/register", post(auth::register))
        .route("/api/login", post(auth::login))
        .route("/api/admin/login", post(auth::admin_login));

    // Paths shared by several policies guard each method separately.
    let mixed = Router::new()
        .route(
            "/api/jobs",
            get(jobs::list).merge(post(jobs::create).route_layer(admin.clone())),
        )
        .route(
            "/api/jobs/{id}",
            get(jobs::get).merge(
                put(jobs::update)
                    .delete(jobs::delete)
                    .route_layer(admin.clone()),
            ),
        )
        .route(
            "/api/applications",
            get(applications::list_all)
                .route_layer(admin.clone())
                .merge(post(applications::apply).route_layer(applicant)),
        )
        .route(
            "/api/referrals",
            get(referrals::list)
                .route_layer(admin.clone())
                .merge(post(referrals::create).route_layer(authenticated.clone())),
        )
        .route(
            "/api/companies",
            get(companies::list).merge(post(companies::create).route_layer(admin.clone())),
        )
        .route(
            "/api/companies/{id}",
            get(companies::get).merge(
                put(companies::update)
                    .delete(companies::delete)
                    .route_layer(admin.clone()),
            ),
        );

    let admin_only = Router::new()
        .route("/api/jobs/{id}/applications", get(jobs::applications))
        .route(
            "/api/applications/{id}/status",
            put(applications::update_status),
        )
        .route(
            "/api/applications/count/today",
            get(applications::count_today),
        )
        .route("/api/uploads/count", get(admin::uploads_count))
        .route("/api/admin/users", get(admin::list_users))
        .route_layer(admin);

    let super_admin_only = Router::new()
        .route("/api/admin/users/{id}/role", put(admin::set_role))
        .route(
            "/api/admin/users/{id}",
            delete(admin::delete_user),
        )
        .route_layer(super_admin);

    let signed_in = Router::new()
        .route("/api/my-applications", get(applications::mine))
        .route(
            "/api/my-applications/{id}",
            delete(applications::withdraw),
        )
        // Profile
        .route("/api/profile", get(profile::get).put(profile::update))
        .route(
            "/api/profile/education",
            get(education::list).post(education::create),
        )
        .route(
            "/api/profile/education/{id}",
            put(education::update).delete(education::delete),
        )
        .route(
            "/api/profile/experience",
            get(experience::list).post(experience::create),
        )
        .route(
            "/api/profile/experience/{id}",
            put(experience::update).delete(experience::delete),
        )
        .route(
            "/api/profile/skills",
            get(skills::list).post(skills::create),
        )
        .route(
            "/api/profile/skills/{id}",
            put(skills::update).delete(skills::delete),
        )
        .route(
            "/api/profile/projects",
            get(projects::list).post(projects::create),
        )
        .route(
            "/api/profile/projects/{id}",
            put(projects::update).delete(projects::delete),
        )
        .route_layer(authenticated);

    public
        .merge(mixed)
        .merge(admin_only)
        .merge(super_admin_only)
        .merge(signed_in)
}

/// `201 Created` with `{message, id}`.
pub(crate) fn created(message: &str, id: i64) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({ "message": message, "id": id })),
    )
}

pub(crate) fn message(message: &str) -> Json<Value> {
    Json(json!({ "message": message }))
}

/// A list sent either as a JSON array or as one comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Items(Vec<String>),
    Csv(String),
}

impl ListInput {
    /// Trimmed entries with blanks dropped.
    pub fn into_vec(self) -> Vec<String> {
        let items = match self {
            ListInput::Items(items) => items,
            ListInput::Csv(csv) => csv.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// An id sent as a JSON number or as a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
}

impl IdInput {
    pub fn parse(&self) -> Option<i64> {
        match self {
            IdInput::Number(n) => Some(*n),
            IdInput::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IdInput, ListInput};

    #[test]
    fn list_input_accepts_array_or_csv() {
        let from_array: ListInput = serde_json::from_str(r#"["Rust", " SQL ", ""]"#).unwrap();
        assert_eq!(from_array.into_vec(), vec!["Rust", "SQL"]);

        let from_csv: ListInput = serde_json::from_str(r#""Python, React,,Go""#).unwrap();
        assert_eq!(from_csv.into_vec(), vec!["Python", "React", "Go"]);
    }

    #[test]
    fn id_input_accepts_number_or_string() {
        let n: IdInput = serde_json::from_str("42").unwrap();
        let s: IdInput = serde_json::from_str(r#"" 7 ""#).unwrap();
        let bad: IdInput = serde_json::from_str(r#""seven""#).unwrap();
        assert_eq!(n.parse(), Some(42));
        assert_eq!(s.parse(), Some(7));
        assert_eq!(bad.parse(), None);
    }
}
