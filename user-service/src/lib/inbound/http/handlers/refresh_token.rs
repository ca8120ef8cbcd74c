use auth::TokenPair;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::required;
use super::unix_now;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange a refresh token for a fresh token pair.
pub async fn refresh_token(
    State(state): State<AppState>,
    body: Result<Json<RefreshTokenRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TokenPair>, ApiError> {
    let Json(body) = body?;
    let refresh_token = required(body.refresh_token, "refresh_token")?;

    state
        .auth_service
        .approve(&refresh_token, unix_now())
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::CREATED, tokens))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequestBody {
    refresh_token: Option<String>,
}
