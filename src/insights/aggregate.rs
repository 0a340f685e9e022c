//! Aggregation primitives: means, symptom counts, meal quality.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::records::{CheckIn, Meal};

pub const GUT_FRIENDLY_MIN: f64 = 7.0;
pub const TO_AVOID_BELOW: f64 = 5.0;

/// Mean of `values`, or `None` when there are none.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Averages {
    pub energy: Option<f64>,
    pub gut: Option<f64>,
    pub mood: Option<f64>,
}

pub fn averages(check_ins: &[CheckIn]) -> Averages {
    Averages {
        energy: mean(check_ins.iter().map(|c| c.energy() as f64)),
        gut: mean(check_ins.iter().map(|c| c.gut() as f64)),
        mood: mean(check_ins.iter().map(|c| c.mood() as f64)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymptomCount {
    pub symptom: String,
    pub label: String,
    pub count: usize,
}

/// Number of check-ins reporting each symptom id, keyed in id order.
/// A repeated id within one check-in counts once.
pub fn symptom_counts(check_ins: &[CheckIn]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for ci in check_ins {
        let distinct: BTreeSet<&str> = ci.symptoms.iter().map(String::as_str).collect();
        for s in distinct {
            *counts.entry(s).or_insert(0) += 1;
        }
    }
    counts
}

/// Most frequent symptoms, count descending then id ascending.
pub fn top_symptoms(check_ins: &[CheckIn], limit: usize) -> Vec<SymptomCount> {
    let mut ranked: Vec<(&str, usize)> = symptom_counts(check_ins).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(id, count)| SymptomCount {
            symptom: id.to_string(),
            label: crate::records::symptom_label(id),
            count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealQuality {
    pub meal_count: usize,
    pub avg_gut_score: Option<f64>,
    pub avg_fiber_per_meal: Option<f64>,
    pub avg_sugar_per_meal: Option<f64>,
    pub gut_friendly_count: usize,
    pub to_avoid_count: usize,
}

/// Per-meal averages. Missing fiber or sugar counts as zero toward the
/// per-meal figure; gut score is averaged only over meals that have one.
pub fn meal_quality(meals: &[Meal]) -> MealQuality {
    let scores: Vec<f64> = meals.iter().filter_map(Meal::gut_score).collect();
    let per_meal = |total: f64| (!meals.is_empty()).then(|| total / meals.len() as f64);

    MealQuality {
        meal_count: meals.len(),
        avg_gut_score: mean(scores.iter().copied()),
        avg_fiber_per_meal: per_meal(meals.iter().filter_map(Meal::fiber).sum()),
        avg_sugar_per_meal: per_meal(meals.iter().filter_map(Meal::sugar).sum()),
        gut_friendly_count: scores.iter().filter(|s| **s >= GUT_FRIENDLY_MIN).count(),
        to_avoid_count: scores.iter().filter(|s| **s < TO_AVOID_BELOW).count(),
    }
}

/// Check-ins sorted by date, then by write time.
pub fn chronological(check_ins: &[CheckIn]) -> Vec<&CheckIn> {
    let mut sorted: Vec<&CheckIn> = check_ins.iter().collect();
    sorted.sort_by(|a, b| a.date.cmp(&b.date).then(a.logged_at.cmp(&b.logged_at)));
    sorted
}
