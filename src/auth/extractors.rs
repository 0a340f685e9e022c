use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use time::UtcOffset;
use tracing::warn;
use uuid::Uuid;

use super::jwt;
use crate::error::ApiError;
use crate::state::AppState;

/// Client UTC offset in minutes, e.g. `-300` for UTC-5.
pub const UTC_OFFSET_HEADER: &str = "x-utc-offset";

/// Who is asking and which calendar they live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: Uuid,
    pub utc_offset: UtcOffset,
}

fn parse_offset(parts: &Parts) -> Result<UtcOffset, ApiError> {
    let Some(raw) = parts.headers.get(UTC_OFFSET_HEADER) else {
        return Ok(UtcOffset::UTC);
    };
    let minutes: i32 = raw
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .ok_or_else(|| ApiError::BadRequest("X-Utc-Offset must be whole minutes".into()))?;
    UtcOffset::from_whole_seconds(minutes.saturating_mul(60))
        .map_err(|_| ApiError::BadRequest(format!("X-Utc-Offset {minutes} is out of range")))
}

#[async_trait]
impl FromRequestParts<AppState> for UserContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing Authorization header".into()))?;

        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::Unauthorized("invalid auth scheme".into()))?;

        let claims = jwt::verify(&state.config.jwt, token).map_err(|e| {
            warn!(error = %e, "token rejected");
            ApiError::Unauthorized("invalid or expired token".into())
        })?;

        Ok(UserContext {
            user_id: claims.sub,
            utc_offset: parse_offset(parts)?,
        })
    }
}
