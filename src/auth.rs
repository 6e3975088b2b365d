use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use model::entities::user;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;
use crate::schemas::AppState;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username of the session owner.
    pub sub: String,
    pub user_id: i32,
    pub is_staff: bool,
    pub exp: usize,
}

/// Identity established from a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub is_staff: bool,
}

/// Staff-only guard. Extraction fails with a uniform permission error for
/// non-staff sessions, so staff-only handlers declare this as an argument
/// instead of repeating the role check in every handler body.
#[derive(Debug, Clone)]
pub struct Staff(pub AuthUser);

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, ApiError> {
    verify(password, password_hash)
        .map_err(|e| ApiError::Internal(format!("failed to verify password: {}", e)))
}

/// Issue a session token for the given user, valid for 24 hours.
pub fn issue_token(user: &user::Model, jwt_secret: &str) -> Result<String, ApiError> {
    let expiration = (Utc::now() + Duration::hours(24)).timestamp() as usize;

    let claims = Claims {
        sub: user.username.clone(),
        user_id: user.id,
        is_staff: user.is_staff,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )
    .map_err(|e| ApiError::Internal(format!("failed to sign session token: {}", e)))
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(ApiError::Authentication)?;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|e| {
            warn!("rejecting request with invalid session token: {}", e);
            ApiError::Authentication
        })?;

        Ok(AuthUser {
            id: token_data.claims.user_id,
            username: token_data.claims.sub,
            is_staff: token_data.claims.is_staff,
        })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Staff {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_staff {
            return Err(ApiError::Permission);
        }
        Ok(Staff(user))
    }
}
