mod dto;
pub mod estimate;
pub mod handlers;

use crate::state::AppState;
use axum::Router;

pub use estimate::{estimate_locally, EstimateSource, NutritionEstimate};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::estimate_routes())
}
