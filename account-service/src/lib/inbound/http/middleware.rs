use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::IdentityError;

/// Identity resolved from the bearer token, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

/// Middleware that resolves the caller from the `Authorization` header and
/// rejects the request before the handler runs when it cannot.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().map(str::to_owned))
        .transpose()
        .map_err(|_| ApiError::from(IdentityError::UnprocessableHeader))?;

    let user = state
        .user_service
        .resolve_identity(authorization.as_deref())
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Identity resolution failed");
            ApiError::from(e)
        })?;

    req.extensions_mut().insert(AuthenticatedUser(user));

    Ok(next.run(req).await)
}
