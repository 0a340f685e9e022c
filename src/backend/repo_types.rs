use sqlx::FromRow;
use time::{Date, OffsetDateTime};

use crate::error::BackendError;
use crate::records::{CheckIn, Meal, MealType, Supplement, SupplementKind};

#[derive(Debug, FromRow)]
pub struct CheckInRow {
    pub check_in_date: Date,
    pub energy: i32,
    pub gut: i32,
    pub mood: i32,
    pub symptoms: Vec<String>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
}

impl From<CheckInRow> for CheckIn {
    fn from(r: CheckInRow) -> Self {
        Self {
            date: r.check_in_date,
            energy: r.energy,
            gut: r.gut,
            mood: r.mood,
            symptoms: r.symptoms,
            notes: r.notes,
            logged_at: r.created_at,
        }
    }
}

#[derive(Debug, FromRow)]
pub struct MealRow {
    pub meal_type: String,
    pub description: Option<String>,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub gut_score: Option<f64>,
    pub ai_analysis: Option<String>,
    pub ai_tips: Vec<String>,
    pub logged_at: OffsetDateTime,
}

impl TryFrom<MealRow> for Meal {
    type Error = BackendError;

    fn try_from(r: MealRow) -> Result<Self, Self::Error> {
        let meal_type = MealType::parse(&r.meal_type).ok_or_else(|| BackendError::MalformedRow {
            table: "meals",
            message: format!("unknown meal_type {:?}", r.meal_type),
        })?;
        Ok(Self {
            meal_type,
            description: r.description.unwrap_or_default(),
            calories: r.calories,
            protein: r.protein,
            carbs: r.carbs,
            fat: r.fat,
            fiber: r.fiber,
            sugar: r.sugar,
            gut_score: r.gut_score,
            ai_analysis: r.ai_analysis,
            tips: r.ai_tips,
            logged_at: r.logged_at,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct SupplementRow {
    pub name: String,
    pub dosage: Option<String>,
    pub active: bool,
    pub kind: String,
}

impl From<SupplementRow> for Supplement {
    fn from(r: SupplementRow) -> Self {
        let kind = match r.kind.as_str() {
            "medication" => SupplementKind::Medication,
            _ => SupplementKind::Supplement,
        };
        Self {
            name: r.name,
            dosage: r.dosage,
            active: r.active,
            kind,
        }
    }
}
