use auth::Scheme;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::extract_credential;
use crate::inbound::http::router::AppState;

/// Event name that upgrades a user to Chirpy Red.
pub const USER_UPGRADED_EVENT: &str = "user.upgraded";

/// Payment provider webhook, authenticated with `Authorization: ApiKey <key>`.
///
/// Events other than `user.upgraded` are acknowledged and ignored.
pub async fn polka_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<PolkaWebhookRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let api_key = extract_credential(&headers, Scheme::ApiKey)?;
    if *api_key != *state.polka_api_key {
        tracing::warn!("Webhook called with an unknown API key");
        return Err(ApiError::unauthorized());
    }

    let Json(body) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if body.event != USER_UPGRADED_EVENT {
        tracing::debug!(event = %body.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = UserId::from_string(&body.data.user_id)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .user_service
        .upgrade_to_chirpy_red(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolkaWebhookRequest {
    event: String,
    data: PolkaWebhookData,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PolkaWebhookData {
    user_id: String,
}
