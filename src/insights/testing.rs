//! Record builders shared by the engine's unit tests.

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

use crate::records::{CheckIn, Meal, MealType, Supplement, SupplementKind};

pub fn day(d: u8) -> Date {
    Date::from_calendar_date(2025, Month::March, d).expect("valid test date")
}

pub fn at(d: u8, hour: u8) -> OffsetDateTime {
    PrimitiveDateTime::new(day(d), Time::from_hms(hour, 0, 0).expect("valid test time")).assume_utc()
}

/// Check-in on 2025-03-`d`, written at 08:00 UTC.
pub fn check_in(d: u8, energy: i32, gut: i32, mood: i32, symptoms: &[&str]) -> CheckIn {
    CheckIn {
        date: day(d),
        energy,
        gut,
        mood,
        symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        notes: None,
        logged_at: at(d, 8),
    }
}

pub fn meal(d: u8, hour: u8, meal_type: MealType, description: &str) -> Meal {
    Meal {
        meal_type,
        description: description.to_string(),
        calories: None,
        protein: None,
        carbs: None,
        fat: None,
        fiber: None,
        sugar: None,
        gut_score: None,
        ai_analysis: None,
        tips: vec![],
        logged_at: at(d, hour),
    }
}

pub fn supplement(name: &str, active: bool) -> Supplement {
    Supplement {
        name: name.to_string(),
        dosage: None,
        active,
        kind: SupplementKind::Supplement,
    }
}
