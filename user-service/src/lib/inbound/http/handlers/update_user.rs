use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::UserData;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        let username = self.username.map(Username::new).transpose()?;
        let role = self.role.map(|role| role.parse::<Role>()).transpose()?;

        Ok(UpdateUserCommand {
            username,
            password: self.password,
            role,
        })
    }
}

/// Partially update a user.
///
/// Callers may update their own account; admins may update any account.
/// Only admins may change a role.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;
    let Json(req) = body?;
    let command = req.try_into_command()?;

    let target = state.user_service.get_user(&user_id).await?;

    if !caller.is_admin() {
        if target.username.as_str() != caller.username {
            return Err(ApiError::Unauthorized(
                "Only the account owner or an admin may update this user".to_string(),
            ));
        }
        if command.role.is_some_and(|role| role != target.role) {
            return Err(ApiError::Unauthorized(
                "Only an admin may change a role".to_string(),
            ));
        }
    }

    state
        .user_service
        .update_user(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
