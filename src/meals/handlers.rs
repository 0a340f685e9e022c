use axum::{routing::post, Json, Router};
use tracing::{info, instrument};

use super::dto::{EstimateRequest, MAX_DESCRIPTION_CHARS};
use super::estimate::{estimate_locally, NutritionEstimate};
use crate::auth::UserContext;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn estimate_routes() -> Router<AppState> {
    Router::new().route("/meals/estimate", post(estimate_meal))
}

/// POST /meals/estimate { description, meal_type }
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn estimate_meal(
    user: UserContext,
    Json(body): Json<EstimateRequest>,
) -> ApiResult<Json<NutritionEstimate>> {
    let description = body.description.trim();
    if description.is_empty() {
        return Err(ApiError::BadRequest("description is required".into()));
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(ApiError::BadRequest(format!(
            "description is longer than {MAX_DESCRIPTION_CHARS} characters"
        )));
    }

    let estimate = estimate_locally(description, body.meal_type);
    info!(
        meal_type = body.meal_type.as_str(),
        matched = estimate.matched_foods.len(),
        "local estimate"
    );
    Ok(Json(estimate))
}
