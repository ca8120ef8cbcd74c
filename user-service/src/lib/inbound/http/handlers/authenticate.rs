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
use crate::domain::authentication::models::Credentials;
use crate::inbound::http::router::AppState;

/// Exchange username and password for a token pair.
pub async fn authenticate(
    State(state): State<AppState>,
    body: Result<Json<AuthenticateRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<TokenPair>, ApiError> {
    let Json(body) = body?;
    let credentials = body.try_into_credentials()?;

    state
        .auth_service
        .login(credentials, unix_now())
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::CREATED, tokens))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    username: Option<String>,
    password: Option<String>,
}

impl AuthenticateRequestBody {
    fn try_into_credentials(self) -> Result<Credentials, ApiError> {
        let username = required(self.username, "username")?;
        let password = required(self.password, "password")?;
        Ok(Credentials::new(username, password))
    }
}
