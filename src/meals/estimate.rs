//! Local nutrition estimate used when the meal-analysis service is down.
//!
//! Deliberately coarse: every table entry whose name appears in the
//! description is added up once.

use serde::Serialize;

use crate::records::MealType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateSource {
    Local,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionEstimate {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub gut_score: f64,
    pub analysis: String,
    pub tips: Vec<String>,
    pub matched_foods: Vec<&'static str>,
    pub source: EstimateSource,
}

#[derive(Debug, Clone, Copy)]
struct FoodFacts {
    name: &'static str,
    cal: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
    sugar: f64,
    gut: f64,
}

macro_rules! food {
    ($name:literal, $cal:expr, $p:expr, $c:expr, $f:expr, $fib:expr, $s:expr, $g:expr) => {
        FoodFacts {
            name: $name,
            cal: $cal as f64,
            protein: $p as f64,
            carbs: $c as f64,
            fat: $f as f64,
            fiber: $fib as f64,
            sugar: $s as f64,
            gut: $g as f64,
        }
    };
}

#[rustfmt::skip]
const FOOD_TABLE: &[FoodFacts] = &[
    // proteins
    food!("chicken", 165, 31, 0, 4, 0, 0, 7),
    food!("egg", 78, 6, 1, 5, 0, 0, 7),
    food!("fish", 150, 26, 0, 5, 0, 0, 8),
    food!("salmon", 208, 20, 0, 13, 0, 0, 9),
    food!("beef", 250, 26, 0, 15, 0, 0, 5),
    food!("tofu", 144, 15, 4, 8, 2, 1, 7),
    // grains
    food!("rice", 206, 4, 45, 0, 1, 0, 6),
    food!("oats", 150, 5, 27, 3, 4, 1, 9),
    food!("bread", 79, 3, 15, 1, 1, 2, 5),
    food!("pasta", 220, 8, 43, 1, 2, 1, 5),
    food!("quinoa", 222, 8, 39, 4, 5, 0, 8),
    // vegetables
    food!("salad", 20, 2, 4, 0, 2, 2, 9),
    food!("broccoli", 55, 4, 11, 1, 5, 2, 9),
    food!("spinach", 23, 3, 4, 0, 2, 0, 9),
    food!("carrot", 41, 1, 10, 0, 3, 5, 8),
    food!("vegetable", 50, 2, 10, 0, 3, 3, 8),
    // fruit
    food!("apple", 95, 0, 25, 0, 4, 19, 7),
    food!("banana", 105, 1, 27, 0, 3, 14, 8),
    food!("bananas", 210, 2, 54, 1, 6, 28, 8),
    food!("berry", 85, 1, 21, 0, 8, 12, 9),
    food!("orange", 62, 1, 15, 0, 3, 12, 7),
    food!("fruit", 80, 1, 20, 0, 3, 15, 7),
    // dairy
    food!("milk", 149, 8, 12, 8, 0, 12, 4),
    food!("cheese", 113, 7, 0, 9, 0, 0, 4),
    food!("yogurt", 100, 17, 6, 1, 0, 4, 7),
    // processed
    food!("pizza", 285, 12, 36, 10, 2, 4, 3),
    food!("burger", 354, 20, 29, 17, 1, 5, 3),
    food!("fries", 365, 4, 48, 17, 4, 0, 2),
    food!("fried", 300, 15, 20, 18, 1, 2, 3),
    food!("sandwich", 350, 15, 35, 15, 3, 5, 5),
    // drinks
    food!("coffee", 2, 0, 0, 0, 0, 0, 5),
    food!("smoothie", 200, 5, 40, 2, 4, 25, 6),
    food!("juice", 110, 1, 26, 0, 0, 22, 4),
    food!("soda", 140, 0, 39, 0, 0, 39, 1),
    // other
    food!("avocado", 234, 3, 12, 21, 10, 1, 9),
    food!("nuts", 170, 5, 6, 15, 2, 1, 7),
    food!("soup", 150, 8, 20, 4, 3, 4, 7),
];

/// Typical plate per meal type when nothing in the table matched.
fn meal_type_default(meal_type: MealType) -> FoodFacts {
    match meal_type {
        MealType::Breakfast => food!("breakfast", 350, 12, 45, 12, 4, 15, 6),
        MealType::Lunch => food!("lunch", 550, 25, 55, 20, 6, 10, 6),
        MealType::Dinner => food!("dinner", 650, 30, 60, 25, 5, 8, 6),
        MealType::Snack => food!("snack", 200, 5, 25, 8, 2, 12, 5),
    }
}

fn mentions_any(desc: &str, words: &[&str]) -> bool {
    words.iter().any(|w| desc.contains(w))
}

fn local_analysis(description: &str) -> String {
    let desc = description.to_lowercase();
    let canned: &[(&[&str], &str)] = &[
        (&["banana"], "Bananas are excellent for gut health! Rich in prebiotic fiber and potassium. The resistant starch feeds beneficial bacteria."),
        (&["apple"], "Apples contain pectin, a prebiotic fiber that supports gut bacteria. The skin has most of the fiber, so keep it on!"),
        (&["avocado"], "Avocados are fantastic for gut health! High in fiber and healthy fats that support digestion."),
        (&["berry", "berries"], "Excellent gut-friendly choice! Berries are high in fiber and antioxidants that support gut health."),
        (&["salad", "vegetable", "greens"], "Great choice! Vegetables are excellent for gut health. The fiber feeds beneficial bacteria."),
        (&["fried", "pizza", "burger"], "This meal may be heavy on your gut. Fried foods can cause inflammation. Consider adding vegetables next time."),
        (&["oats", "oatmeal"], "Oats are a gut superfood! Beta-glucan fiber feeds good bacteria and helps maintain steady blood sugar."),
        (&["yogurt", "curd"], "Yogurt contains live probiotics that support your gut microbiome. Choose plain varieties for less sugar."),
        (&["chicken", "fish", "salmon"], "Good protein choice. Lean proteins are easier to digest than red meat."),
        (&["dairy", "cheese", "milk"], "Dairy can be hard to digest for some people. Monitor how you feel after this meal."),
        (&["egg"], "Eggs are nutrient-dense and easy to digest. Great source of protein and healthy fats."),
        (&["rice"], "Rice is easy to digest. Brown rice has more fiber and nutrients than white rice."),
    ];

    canned
        .iter()
        .find(|(words, _)| mentions_any(&desc, words))
        .map(|(_, text)| text.to_string())
        .unwrap_or_else(|| {
            format!(
                "Meal logged: \"{description}\". Track how you feel in 2-3 hours to understand its gut impact."
            )
        })
}

fn local_tips(description: &str) -> Vec<String> {
    let desc = description.to_lowercase();
    let mut tips = Vec::new();

    if !mentions_any(&desc, &["vegetable", "salad", "greens"]) {
        tips.push("Add vegetables to increase fiber intake");
    }
    if mentions_any(&desc, &["fried", "fries"]) {
        tips.push("Try baked or grilled options for better gut health");
    }
    if mentions_any(&desc, &["soda", "juice"]) {
        tips.push("Replace sugary drinks with water or herbal tea");
    }
    if !mentions_any(&desc, &["fiber", "oats", "berry"]) {
        tips.push("Consider adding high-fiber foods like oats or berries");
    }
    if tips.is_empty() {
        tips.push("Stay hydrated for optimal digestion");
        tips.push("Eat slowly to improve nutrient absorption");
    }

    tips.into_iter().take(3).map(String::from).collect()
}

pub fn estimate_locally(description: &str, meal_type: MealType) -> NutritionEstimate {
    let desc = description.to_lowercase();
    let matched: Vec<&FoodFacts> = FOOD_TABLE.iter().filter(|f| desc.contains(f.name)).collect();

    let analysis = local_analysis(description);
    let tips = local_tips(description);

    if matched.is_empty() {
        let d = meal_type_default(meal_type);
        return NutritionEstimate {
            calories: d.cal,
            protein: d.protein,
            carbs: d.carbs,
            fat: d.fat,
            fiber: d.fiber,
            sugar: d.sugar,
            gut_score: d.gut,
            analysis,
            tips,
            matched_foods: Vec::new(),
            source: EstimateSource::Local,
        };
    }

    let sum = |field: fn(&FoodFacts) -> f64| matched.iter().map(|f| field(f)).sum::<f64>().round();
    let gut = matched.iter().map(|f| f.gut).sum::<f64>() / matched.len() as f64;

    NutritionEstimate {
        calories: sum(|f| f.cal),
        protein: sum(|f| f.protein),
        carbs: sum(|f| f.carbs),
        fat: sum(|f| f.fat),
        fiber: sum(|f| f.fiber),
        sugar: sum(|f| f.sugar),
        gut_score: (gut * 10.0).round() / 10.0,
        analysis,
        tips,
        matched_foods: matched.iter().map(|f| f.name).collect(),
        source: EstimateSource::Local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_every_matching_entry() {
        let est = estimate_locally("Salmon with rice and broccoli", MealType::Dinner);
        assert_eq!(est.matched_foods, vec!["salmon", "rice", "broccoli"]);
        assert_eq!(est.calories, 208.0 + 206.0 + 55.0);
        assert_eq!(est.fiber, 6.0);
        assert_eq!(est.gut_score, 8.0);
        assert_eq!(est.source, EstimateSource::Local);
        assert!(est.analysis.starts_with("Good protein choice"));
    }

    #[test]
    fn overlapping_names_both_count() {
        // "bananas" also contains "banana"
        let est = estimate_locally("two bananas", MealType::Snack);
        assert_eq!(est.matched_foods, vec!["banana", "bananas"]);
        assert_eq!(est.sugar, 42.0);
    }

    #[test]
    fn gut_score_is_rounded_to_one_decimal() {
        // (9 + 4 + 9) / 3 = 7.333..
        let est = estimate_locally("oats with milk and berry", MealType::Breakfast);
        assert_eq!(est.gut_score, 7.3);
    }

    #[test]
    fn unknown_food_falls_back_to_meal_type() {
        let est = estimate_locally("mystery stew", MealType::Lunch);
        assert!(est.matched_foods.is_empty());
        assert_eq!(est.calories, 550.0);
        assert_eq!(est.gut_score, 6.0);
        assert!(est.analysis.contains("mystery stew"));
        assert_eq!(
            est.tips,
            vec![
                "Add vegetables to increase fiber intake".to_string(),
                "Consider adding high-fiber foods like oats or berries".to_string(),
            ]
        );
    }

    #[test]
    fn tips_fall_back_when_meal_looks_balanced() {
        let est = estimate_locally("salad with oats", MealType::Lunch);
        assert_eq!(est.tips.len(), 2);
        assert_eq!(est.tips[0], "Stay hydrated for optimal digestion");
    }
}
