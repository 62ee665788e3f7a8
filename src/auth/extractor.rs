use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};

use crate::auth::jwt;
use crate::error::AppError;
use crate::models::Role;
use crate::state::SharedState;

/// Identity recovered from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub is_admin: bool,
    pub role: Role,
}

impl AuthUser {
    /// Decode the `Authorization: Bearer` header.
    pub fn from_headers(headers: &HeaderMap, secret: &str) -> Result<Self, AppError> {
        if headers.get("authorization").is_none() {
            return Err(AppError::Unauthorized(
                "Missing authentication token".to_string(),
            ));
        }

        let Authorization(bearer) = headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let claims = jwt::decode_token(bearer.token(), secret)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            is_admin: claims.adm,
            role: claims.role(),
        })
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    pub fn require_super_admin(&self) -> Result<(), AppError> {
        if self.is_admin && self.role == Role::SuperAdmin {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "Super admin access required".to_string(),
            ))
        }
    }

    pub fn require_applicant(&self) -> Result<(), AppError> {
        if self.is_admin {
            Err(AppError::Forbidden(
                "Admins cannot apply for jobs".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        // Already verified by the route group's policy layer.
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        AuthUser::from_headers(&parts.headers, &state.config.jwt_secret)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue};

    use super::AuthUser;
    use crate::auth::jwt::{encode_token, Claims};
    use crate::error::AppError;
    use crate::models::Role;

    const SECRET: &str = "extractor-secret";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn decodes_bearer_token() {
        let token = encode_token(&Claims::new(9, Role::Admin, 5), SECRET).unwrap();
        let user = AuthUser::from_headers(&headers_with(&format!("Bearer {token}")), SECRET).unwrap();

        assert_eq!(user.user_id, 9);
        assert!(user.is_admin);
        assert!(user.require_admin().is_ok());
        assert!(user.require_super_admin().is_err());
        assert!(user.require_applicant().is_err());
    }

    #[test]
    fn missing_or_malformed_header_is_unauthorized() {
        assert!(matches!(
            AuthUser::from_headers(&HeaderMap::new(), SECRET),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            AuthUser::from_headers(&headers_with("Basic dXNlcjpwdw=="), SECRET),
            Err(AppError::Unauthorized(_))
        ));
        assert!(matches!(
            AuthUser::from_headers(&headers_with("Bearer not-a-jwt"), SECRET),
            Err(AppError::Unauthorized(_))
        ));
    }
}
