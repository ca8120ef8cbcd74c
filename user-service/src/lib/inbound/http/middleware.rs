use auth::AuthenticationError;
use auth::TokenClaims;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::Role;
use crate::inbound::http::handlers::unix_now;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Identity of the caller, inserted into request extensions by the guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin.as_str()
    }
}

impl From<TokenClaims> for AuthenticatedUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            username: claims.username,
            role: claims.role,
        }
    }
}

/// Guard admitting any request with a valid bearer token.
pub async fn auth_required(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let claims = state
        .authenticator
        .validate_token(token, unix_now())
        .map_err(|e| {
            tracing::warn!(error = %e, "Token validation failed");
            ApiError::Unauthorized(format!("Invalid token: {}", e))
        })?;

    req.extensions_mut().insert(AuthenticatedUser::from(claims));

    Ok(next.run(req).await)
}

/// Guard admitting only valid bearer tokens whose role is `admin`.
pub async fn admin_required(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let claims = state
        .authenticator
        .authorize(token, Role::Admin.as_str(), unix_now())
        .map_err(|e| {
            match &e {
                AuthenticationError::InsufficientRole { .. } => {
                    tracing::warn!(error = %e, "Admin access denied")
                }
                _ => tracing::warn!(error = %e, "Token validation failed"),
            }
            ApiError::Unauthorized(e.to_string())
        })?;

    req.extensions_mut().insert(AuthenticatedUser::from(claims));

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let value = value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(ApiError::Unauthorized(
            "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
        )),
    }
}
