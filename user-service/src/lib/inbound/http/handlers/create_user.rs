use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use super::required;
use super::unix_now;
use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::Username;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Register a new user.
///
/// Open to anonymous callers for the `user` role. Registering an `admin`
/// requires an admin bearer token.
pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;

    if command.role == Role::Admin {
        let token = bearer_token(&headers)?;
        state
            .authenticator
            .authorize(token, Role::Admin.as_str(), unix_now())
            .map_err(|e| {
                tracing::warn!(error = %e, "Admin registration denied");
                ApiError::Unauthorized(e.to_string())
            })?;
    }

    let user = state.user_service.create_user(command).await?;

    let location = HeaderValue::from_str(&format!("/users/{}", user.id))
        .map_err(|e| ApiError::InternalServerError(e.to_string()))?;

    Ok((
        [(header::LOCATION, location)],
        ApiSuccess::new(StatusCode::CREATED, UserData::from(&user)),
    )
        .into_response())
}

/// HTTP request body for creating a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateUserRequest {
    username: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

impl CreateUserRequest {
    fn try_into_command(self) -> Result<CreateUserCommand, ApiError> {
        let username = Username::new(required(self.username, "username")?)
            .map_err(UserError::from)?;
        let password = required(self.password, "password")?;
        let role = self
            .role
            .map(|role| role.parse::<Role>())
            .transpose()
            .map_err(UserError::from)?
            .unwrap_or_default();
        Ok(CreateUserCommand::new(username, password, role))
    }
}
