//! Bearer-token authentication for Supabase-issued access tokens.
//!
//! Tokens are HS256 JWTs signed with the project's JWT secret. The `sub`
//! claim is the auth user id that every user-scoped query filters on.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Audience Supabase stamps on tokens for signed-in users.
const AUTHENTICATED_AUDIENCE: &str = "authenticated";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
    pub aud: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUTHENTICATED_AUDIENCE]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.key, &self.validation).map(|data| data.claims)
    }
}

/// The caller behind a verified bearer token.
/// Add it as a handler argument to make a route require authentication.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let claims = state.jwt.verify(token).map_err(|e| {
            debug!("Rejected bearer token: {e}");
            AppError::Unauthorized
        })?;
        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Signs a token the way Supabase does, for tests that go through the router.
#[cfg(test)]
pub fn issue_test_token(secret: &str, user_id: Uuid) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        sub: user_id,
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
        aud: AUTHENTICATED_AUDIENCE.to_string(),
        email: Some("student@example.com".to_string()),
        role: Some("authenticated".to_string()),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("test token encodes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-jwt-secret";

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/users/profile");
        if let Some(v) = value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_verify_accepts_supabase_style_token() {
        let user_id = Uuid::new_v4();
        let token = issue_test_token(SECRET, user_id);
        let claims = JwtVerifier::new(SECRET).verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email.as_deref(), Some("student@example.com"));
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue_test_token("another-secret", Uuid::new_v4());
        assert!(JwtVerifier::new(SECRET).verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_anon_audience() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: (chrono::Utc::now().timestamp() + 3600) as usize,
            aud: "anon".to_string(),
            email: None,
            role: Some("anon".to_string()),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(JwtVerifier::new(SECRET).verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            exp: (chrono::Utc::now().timestamp() - 3600) as usize,
            aud: AUTHENTICATED_AUDIENCE.to_string(),
            email: None,
            role: None,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert!(JwtVerifier::new(SECRET).verify(&token).is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&parts_with_auth(Some("Bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts_with_auth(Some("bearer abc"))), Some("abc"));
        assert_eq!(bearer_token(&parts_with_auth(Some("Basic abc"))), None);
        assert_eq!(bearer_token(&parts_with_auth(Some("Bearer "))), None);
        assert_eq!(bearer_token(&parts_with_auth(None)), None);
    }
}
