//! Route handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use crate::auth::Claims;
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::tagging::{TagRequest, TagRequestBody, TagResponse};

/// Liveness payload.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// `GET /healthcheck`. Unauthenticated, always `{"status": "ok"}`.
pub async fn healthcheck() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

/// `POST /suggest-tags`. Runs behind the bearer gate.
pub async fn suggest_tags(
    State(state): State<AppState>,
    claims: Claims,
    body: Result<Json<TagRequestBody>, JsonRejection>,
) -> Result<Json<TagResponse>, ApiError> {
    let Json(body) = body?;

    let request = TagRequest::try_from(body).map_err(|missing| {
        tracing::info!(missing = ?missing.0, "Rejecting incomplete tag request");
        ApiError::Validation {
            legacy_status: state.legacy_validation_status,
        }
    })?;

    tracing::debug!(
        subject = ?claims.sub,
        name = %request.name,
        "Suggesting tags"
    );

    let response = state.tags.suggest_tags(&request).await?;
    Ok(Json(response))
}
