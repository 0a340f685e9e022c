use axum::{extract::State, routing::put, Json, Router};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::auth::UserContext;
use crate::error::ApiResult;
use crate::records::{CheckIn, NewCheckIn};
use crate::state::AppState;

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/check-ins/today", put(save_today))
}

/// PUT /check-ins/today: insert or replace the check-in for the caller's
/// local today.
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn save_today(
    State(state): State<AppState>,
    user: UserContext,
    Json(body): Json<NewCheckIn>,
) -> ApiResult<Json<CheckIn>> {
    let today = OffsetDateTime::now_utc().to_offset(user.utc_offset).date();
    let draft = body.normalized(today);
    let saved = state.backend.save_check_in(&user, draft).await?;
    info!(date = %saved.date, gut = saved.gut, "check-in saved");
    Ok(Json(saved))
}
