//! Heuristic pattern detectors.
//!
//! Each detector looks at the whole window on its own and yields at most one
//! hint. None of them claim causation; they count coincidences.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use time::{Date, Duration, UtcOffset};

use super::aggregate::symptom_counts;
use super::lookup::{description_mentions, has_active_supplement_named, DAIRY_KEYWORDS};
use crate::records::{symptom_label, CheckIn, Meal, MealType, Supplement};

pub const MAX_PATTERNS: usize = 5;
pub const MIN_OCCURRENCES: usize = 2;

pub const LOW_FIBER_BELOW: f64 = 5.0;
pub const LOW_ENERGY_MAX: i32 = 4;
pub const DAIRY_LOOKBACK_HOURS: i64 = 12;
pub const LATE_DINNER_HOUR: u8 = 21;
pub const LOW_GUT_MAX: i32 = 5;
pub const VERY_LOW_ENERGY_MAX: i32 = 3;
pub const HIGH_SUGAR_ABOVE: f64 = 20.0;

/// Symptoms the dairy detector looks for, in id order.
const DAIRY_SYMPTOMS: [&str; 2] = ["bloating", "gas"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    LowFiberLowEnergy,
    DairySymptom,
    LateDinnerLowGut,
    SupplementConsistency,
    HighSugar,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternInsight {
    pub kind: PatternKind,
    pub icon: &'static str,
    pub text: String,
    pub occurrence_count: usize,
}

/// Everything a detector may look at.
#[derive(Debug, Clone, Copy)]
pub struct Window<'a> {
    pub check_ins: &'a [CheckIn],
    pub meals: &'a [Meal],
    pub supplements: &'a [Supplement],
    /// Offset used to turn meal timestamps into local days and hours.
    pub offset: UtcOffset,
}

/// Runs every detector in declaration order and keeps the first five hits.
pub fn detect_patterns(window: Window<'_>) -> Vec<PatternInsight> {
    [
        low_fiber_low_energy(window),
        dairy_symptom(window),
        late_dinner_low_gut(window),
        supplement_consistency(window),
        high_sugar(window),
    ]
    .into_iter()
    .flatten()
    .take(MAX_PATTERNS)
    .collect()
}

fn meal_days<F>(window: Window<'_>, pred: F) -> HashSet<Date>
where
    F: Fn(&Meal) -> bool,
{
    window
        .meals
        .iter()
        .filter(|&m| pred(m))
        .map(|m| m.local_date(window.offset))
        .collect()
}

fn follows_marked_day(ci: &CheckIn, marked: &HashSet<Date>) -> bool {
    ci.date
        .previous_day()
        .is_some_and(|prev| marked.contains(&prev))
}

/// Low-fiber day followed by a low-energy check-in.
pub fn low_fiber_low_energy(window: Window<'_>) -> Option<PatternInsight> {
    let low_fiber_days = meal_days(window, |m| {
        m.fiber().is_some_and(|f| f < LOW_FIBER_BELOW)
    });
    if low_fiber_days.is_empty() {
        return None;
    }

    let hits: BTreeSet<Date> = window
        .check_ins
        .iter()
        .filter(|ci| ci.energy() <= LOW_ENERGY_MAX && follows_marked_day(ci, &low_fiber_days))
        .map(|ci| ci.date)
        .collect();

    (hits.len() >= MIN_OCCURRENCES).then(|| PatternInsight {
        kind: PatternKind::LowFiberLowEnergy,
        icon: "🥬",
        text: "Low fiber day → low energy the next day".to_string(),
        occurrence_count: hits.len(),
    })
}

/// Dairy eaten in the hours before recurring gas or bloating.
pub fn dairy_symptom(window: Window<'_>) -> Option<PatternInsight> {
    let counts = symptom_counts(window.check_ins);
    let lookback = Duration::hours(DAIRY_LOOKBACK_HOURS);

    DAIRY_SYMPTOMS.iter().find_map(|&symptom| {
        if counts.get(symptom).copied().unwrap_or(0) < MIN_OCCURRENCES {
            return None;
        }
        let flagged: Vec<&CheckIn> = window
            .check_ins
            .iter()
            .filter(|ci| ci.has_symptom(symptom))
            .collect();

        let dairy_meals = window
            .meals
            .iter()
            .filter(|m| {
                flagged.iter().any(|ci| {
                    m.logged_at >= ci.logged_at - lookback && m.logged_at < ci.logged_at
                })
            })
            .filter(|m| description_mentions(m, DAIRY_KEYWORDS))
            .count();

        (dairy_meals > 0).then(|| PatternInsight {
            kind: PatternKind::DairySymptom,
            icon: "🥛",
            text: format!(
                "Dairy → {} within {} hours",
                symptom_label(symptom),
                DAIRY_LOOKBACK_HOURS
            ),
            occurrence_count: dairy_meals,
        })
    })
}

/// Late dinner followed by a low gut score the next morning.
pub fn late_dinner_low_gut(window: Window<'_>) -> Option<PatternInsight> {
    let late_days = meal_days(window, |m| {
        m.meal_type == MealType::Dinner && m.local_hour(window.offset) >= LATE_DINNER_HOUR
    });
    if late_days.is_empty() {
        return None;
    }

    let hits = window
        .check_ins
        .iter()
        .filter(|ci| ci.gut() <= LOW_GUT_MAX && follows_marked_day(ci, &late_days))
        .count();

    (hits >= MIN_OCCURRENCES).then(|| PatternInsight {
        kind: PatternKind::LateDinnerLowGut,
        icon: "🌙",
        text: "Late dinner → low gut score next morning".to_string(),
        occurrence_count: hits,
    })
}

/// Magnesium in the cabinet while energy keeps dipping: a consistency nudge.
pub fn supplement_consistency(window: Window<'_>) -> Option<PatternInsight> {
    if !has_active_supplement_named(window.supplements, "magnesium") {
        return None;
    }
    let low_days = window
        .check_ins
        .iter()
        .filter(|ci| ci.energy() <= VERY_LOW_ENERGY_MAX)
        .count();

    (low_days >= MIN_OCCURRENCES).then(|| PatternInsight {
        kind: PatternKind::SupplementConsistency,
        icon: "💊",
        text: "Low energy days logged: check your magnesium consistency".to_string(),
        occurrence_count: low_days,
    })
}

pub fn high_sugar(window: Window<'_>) -> Option<PatternInsight> {
    let count = window
        .meals
        .iter()
        .filter(|m| m.sugar().is_some_and(|s| s > HIGH_SUGAR_ABOVE))
        .count();

    (count >= MIN_OCCURRENCES).then(|| PatternInsight {
        kind: PatternKind::HighSugar,
        icon: "🍬",
        text: "High sugar meals → may cause inflammation".to_string(),
        occurrence_count: count,
    })
}
