use auth::BearerError;
use auth::Scheme;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store authenticated user ID in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates access tokens and adds user info to request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_credential(req.headers(), Scheme::Bearer).map_err(|e| {
        tracing::debug!(error = %e, "Rejected Authorization header");
        ApiError::from(e)
    })?;

    let user_id = state.session_service.authenticate(&token)?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

/// Read the `Authorization` header and strip the expected scheme.
///
/// A header value that is not visible ASCII cannot carry a valid scheme
/// prefix and is reported as `BadScheme`.
pub fn extract_credential(headers: &HeaderMap, scheme: Scheme) -> Result<String, BearerError> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| BearerError::BadScheme)?),
        None => None,
    };

    auth::extract_token(value, scheme)
}

impl From<BearerError> for ApiError {
    fn from(err: BearerError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}
