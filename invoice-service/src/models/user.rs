//! Authenticated user context extracted from a bearer JWT.

use crate::AppState;
use anyhow::anyhow;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::convert::Infallible;
use uuid::Uuid;

/// Access-token claims (HS256).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Email
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Authenticated caller. Writes are always scoped to `user_id`.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

impl AuthUser {
    pub fn from_bearer(token: &str, secret: &str) -> Result<Self, AppError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;
        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|e| AppError::Unauthorized(anyhow!("Invalid subject claim: {}", e)))?;
        Ok(AuthUser {
            user_id,
            email: data.claims.email,
        })
    }

    fn from_parts(parts: &Parts, state: &AppState) -> Result<Self, AppError> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized(anyhow!("Missing authorization header")))?;
        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized(anyhow!("Expected a bearer token")))?;
        Self::from_bearer(token, state.settings.auth.jwt_secret.expose_secret())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        AuthUser::from_parts(parts, state)
    }
}

/// Optional variant for routes where the save pipeline itself produces the
/// auth failure instead of the extractor rejecting the request.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(AuthUser::from_parts(parts, state).ok()))
    }
}
