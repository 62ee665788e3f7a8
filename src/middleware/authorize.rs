use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::state::SharedState;

/// Access rule attached to a route group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Authenticated,
    Applicant,
    Admin,
    SuperAdmin,
}

impl Policy {
    pub fn check(self, user: &AuthUser) -> Result<(), AppError> {
        match self {
            Policy::Authenticated => Ok(()),
            Policy::Applicant => user.require_applicant(),
            Policy::Admin => user.require_admin(),
            Policy::SuperAdmin => user.require_super_admin(),
        }
    }
}

/// Verify the bearer token once, enforce `policy`, and hand the identity to
/// handlers through request extensions.
async fn enforce(state: &SharedState, policy: Policy, mut req: Request, next: Next) -> Response {
    let user = match AuthUser::from_headers(req.headers(), &state.config.jwt_secret) {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    if let Err(e) = policy.check(&user) {
        tracing::debug!(user_id = user.user_id, ?policy, "request denied by policy");
        return e.into_response();
    }

    req.extensions_mut().insert(user);
    next.run(req).await
}

pub async fn require_auth(State(state): State<SharedState>, req: Request, next: Next) -> Response {
    enforce(&state, Policy::Authenticated, req, next).await
}

pub async fn require_applicant(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Response {
    enforce(&state, Policy::Applicant, req, next).await
}

pub async fn require_admin(State(state): State<SharedState>, req: Request, next: Next) -> Response {
    enforce(&state, Policy::Admin, req, next).await
}

pub async fn require_super_admin(
    State(state): State<SharedState>,
    req: Request,
    next: Next,
) -> Response {
    enforce(&state, Policy::SuperAdmin, req, next).await
}
