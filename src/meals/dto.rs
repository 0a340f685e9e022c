use serde::Deserialize;

use crate::records::MealType;

pub const MAX_DESCRIPTION_CHARS: usize = 500;

#[derive(Debug, Deserialize)]
pub struct EstimateRequest {
    pub description: String,
    pub meal_type: MealType,
}
