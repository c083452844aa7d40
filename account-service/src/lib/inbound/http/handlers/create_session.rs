use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::CreateSessionCommand;
use crate::inbound::http::router::AppState;

pub async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<ApiSuccess<CreateSessionResponseData>, ApiError> {
    let Json(body) = payload?;

    let session = state
        .user_service
        .create_session(CreateSessionCommand::new(body.email, body.password))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        CreateSessionResponseData {
            token: session.token,
        },
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CreateSessionRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSessionResponseData {
    pub token: String,
}
