//! Bearer-token authentication.
//!
//! Every handler that acts on behalf of a user takes an explicit [`AuthUser`]
//! extracted from the `Authorization` header — no ambient session state.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller, resolved once per request.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

/// Validates an HS256 JWT and returns the user id from its `sub` claim.
pub fn verify_token(token: &str, secret: &str) -> Result<Uuid, AppError> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized)?;

    Uuid::parse_str(&decoded.claims.sub).map_err(|_| AppError::Unauthorized)
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .ok_or(AppError::Unauthorized)?;

        let user_id = verify_token(token, &state.config.jwt_secret)?;

        Ok(Self { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: String,
        exp: usize,
    }

    fn make_token(sub: &str, secret: &str) -> String {
        let claims = TestClaims {
            sub: sub.to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_token_yields_user_id() {
        let id = Uuid::new_v4();
        let token = make_token(&id.to_string(), "test-secret");
        assert_eq!(verify_token(&token, "test-secret").unwrap(), id);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let token = make_token(&Uuid::new_v4().to_string(), "test-secret");
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn test_non_uuid_sub_is_unauthorized() {
        let token = make_token("not-a-uuid", "test-secret");
        assert!(verify_token(&token, "test-secret").is_err());
    }

    #[test]
    fn test_garbage_token_is_unauthorized() {
        assert!(verify_token("garbage", "test-secret").is_err());
    }
}
