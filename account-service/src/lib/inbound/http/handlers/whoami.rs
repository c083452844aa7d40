use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Echo the identity resolved by the authentication middleware.
pub async fn whoami(
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&user).into()))
}
