use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::Role;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub adm: bool,
    pub role: String,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i64, role: Role, ttl_minutes: i64) -> Self {
        Self {
            sub: user_id,
            adm: role.is_admin(),
            role: role.as_str().to_string(),
            exp: (Utc::now() + Duration::minutes(ttl_minutes)).timestamp(),
        }
    }

    /// Role carried by the token. The `adm` flag is authoritative for admin
    /// checks, so an unrecognised role never widens access.
    pub fn role(&self) -> Role {
        match Role::parse(&self.role) {
            Some(role) if role.is_admin() == self.adm => role,
            _ if self.adm => Role::Admin,
            _ => Role::User,
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn token_round_trip_preserves_identity() {
        let claims = Claims::new(42, Role::SuperAdmin, 60);
        let token = encode_token(&claims, SECRET).unwrap();
        let decoded = decode_token(&token, SECRET).unwrap();

        assert_eq!(decoded.sub, 42);
        assert!(decoded.adm);
        assert_eq!(decoded.role(), Role::SuperAdmin);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = encode_token(&Claims::new(1, Role::User, 60), SECRET).unwrap();
        assert!(decode_token(&token, "another-secret").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let mut claims = Claims::new(1, Role::User, 60);
        claims.exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = encode_token(&claims, SECRET).unwrap();
        assert!(decode_token(&token, SECRET).is_err());
    }

    #[test]
    fn mismatched_role_falls_back_to_admin_flag() {
        let mut claims = Claims::new(1, Role::User, 60);
        claims.role = "super_admin".to_string();
        assert_eq!(claims.role(), Role::User);
    }
}
