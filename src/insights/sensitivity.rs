//! Naive food-sensitivity scan.
//!
//! Counts how often a trigger food was followed within a day by a digestive
//! symptom. This is a coincidence counter: it does not infer direction and
//! does not control for anything else the user ate.

use serde::Serialize;
use time::Duration;

use super::lookup::description_mentions;
use crate::records::{symptom_label, CheckIn, Meal};

pub const MAX_SENSITIVITIES: usize = 5;
pub const MIN_CO_OCCURRENCES: usize = 2;
pub const FOLLOW_UP_HOURS: i64 = 24;

pub struct TriggerFood {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

pub const TRIGGER_FOODS: [TriggerFood; 8] = [
    TriggerFood { label: "Dairy", keywords: &["dairy", "milk", "cheese", "yogurt", "ice cream"] },
    TriggerFood { label: "Gluten", keywords: &["gluten", "bread", "pasta", "wheat"] },
    TriggerFood { label: "Garlic/Onion", keywords: &["garlic", "onion"] },
    TriggerFood { label: "Coffee", keywords: &["coffee", "caffeine"] },
    TriggerFood { label: "Fried Foods", keywords: &["fried", "oily", "greasy"] },
    TriggerFood { label: "Spicy Foods", keywords: &["spicy", "chili", "hot sauce"] },
    TriggerFood { label: "Alcohol", keywords: &["alcohol", "wine", "beer"] },
    TriggerFood { label: "Sugar", keywords: &["sugar", "candy", "soda"] },
];

pub const DIGESTIVE_SYMPTOMS: [&str; 5] = ["bloating", "gas", "nausea", "heartburn", "diarrhea"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoodSensitivity {
    pub food_label: String,
    pub symptom_label: String,
    pub occurrence_count: usize,
}

/// True if some check-in in `(0h, 24h]` after the meal reports `symptom`.
fn followed_by(meal: &Meal, symptom: &str, check_ins: &[CheckIn]) -> bool {
    let horizon = meal.logged_at + Duration::hours(FOLLOW_UP_HOURS);
    check_ins.iter().any(|ci| {
        ci.logged_at > meal.logged_at && ci.logged_at <= horizon && ci.has_symptom(symptom)
    })
}

pub fn scan_food_sensitivities(meals: &[Meal], check_ins: &[CheckIn]) -> Vec<FoodSensitivity> {
    let mut found = Vec::new();

    for food in &TRIGGER_FOODS {
        let with_food: Vec<&Meal> = meals
            .iter()
            .filter(|m| description_mentions(m, food.keywords))
            .collect();
        if with_food.is_empty() {
            continue;
        }

        for symptom in DIGESTIVE_SYMPTOMS {
            let count = with_food
                .iter()
                .filter(|m| followed_by(m, symptom, check_ins))
                .count();
            if count >= MIN_CO_OCCURRENCES {
                found.push(FoodSensitivity {
                    food_label: food.label.to_string(),
                    symptom_label: symptom_label(symptom),
                    occurrence_count: count,
                });
            }
        }
    }

    found.truncate(MAX_SENSITIVITIES);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::testing::{check_in, meal};
    use crate::records::MealType;

    #[test]
    fn two_dairy_meals_then_bloating() {
        let meals = vec![
            meal(1, 2, MealType::Snack, "glass of milk"),
            meal(3, 3, MealType::Snack, "cheese toastie"),
        ];
        // check-ins at 08:00, six and five hours later
        let cis = vec![
            check_in(1, 5, 4, 5, &["bloating"]),
            check_in(3, 5, 4, 5, &["bloating"]),
        ];
        let found = scan_food_sensitivities(&meals, &cis);
        assert_eq!(
            found,
            vec![FoodSensitivity {
                food_label: "Dairy".into(),
                symptom_label: "Bloating".into(),
                occurrence_count: 2,
            }]
        );
    }

    #[test]
    fn window_is_open_at_meal_time_and_closed_at_one_day() {
        let cis = vec![check_in(1, 5, 5, 5, &["nausea"]), check_in(2, 5, 5, 5, &["nausea"])];

        // 08:00 meals skip the same-moment check-in and reach day 2 at exactly 24h
        let on_the_hour = vec![
            meal(1, 8, MealType::Breakfast, "coffee"),
            meal(1, 8, MealType::Breakfast, "iced coffee"),
        ];
        let found = scan_food_sensitivities(&on_the_hour, &cis);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].food_label, "Coffee");
        assert_eq!(found[0].occurrence_count, 2);

        let single = vec![meal(1, 7, MealType::Breakfast, "coffee")];
        assert!(scan_food_sensitivities(&single, &cis).is_empty());
    }

    #[test]
    fn capped_at_five_in_table_order() {
        let meals: Vec<Meal> = (1..=2)
            .map(|d| meal(d, 1, MealType::Snack, "cheese bread with garlic"))
            .collect();
        let cis: Vec<CheckIn> = (1..=2)
            .map(|d| check_in(d, 5, 3, 5, &["bloating", "gas", "nausea", "heartburn", "diarrhea"]))
            .collect();

        let found = scan_food_sensitivities(&meals, &cis);
        assert_eq!(found.len(), MAX_SENSITIVITIES);
        assert!(found.iter().all(|f| f.food_label == "Dairy"));
        assert_eq!(found[4].symptom_label, "Diarrhea");
    }
}
