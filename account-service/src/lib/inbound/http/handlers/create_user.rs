use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::RegisterUserCommand;
use crate::inbound::http::router::AppState;

pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let Json(body) = payload?;

    state
        .user_service
        .register_user(body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON).
///
/// Missing fields decode as empty strings and are rejected by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    email: String,
    username: String,
    password: String,
}

impl CreateUserRequest {
    fn into_command(self) -> RegisterUserCommand {
        RegisterUserCommand::new(self.email, self.username, self.password)
    }
}
