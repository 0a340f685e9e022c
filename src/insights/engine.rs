use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use tracing::debug;

use super::aggregate::{
    averages, chronological, meal_quality, top_symptoms, Averages, MealQuality, SymptomCount,
};
use super::patterns::{detect_patterns, PatternInsight, Window};
use super::recommend::{recommendations, top_driver, Driver, RuleInputs};
use super::sensitivity::{scan_food_sensitivities, FoodSensitivity};
use super::trend::{gut_trend, Trend, MOMENTUM_THRESHOLD, TWO_WEEK_THRESHOLD};
use crate::records::{CheckIn, Meal, Supplement};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub const DEFAULT_TOP_SYMPTOMS: usize = 4;

/// Tunables for a report. Defaults match the insights screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub trend_threshold: f64,
    pub momentum_threshold: f64,
    pub top_symptoms_limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            trend_threshold: TWO_WEEK_THRESHOLD,
            momentum_threshold: MOMENTUM_THRESHOLD,
            top_symptoms_limit: DEFAULT_TOP_SYMPTOMS,
        }
    }
}

/// One check-in reduced to what the charts need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayScore {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub weekday: String,
    pub gut: i32,
    pub energy: i32,
    pub mood: i32,
}

impl From<&CheckIn> for DayScore {
    fn from(ci: &CheckIn) -> Self {
        let weekday = ci.date.weekday().to_string();
        Self {
            date: ci.date,
            weekday: weekday.chars().take(3).collect(),
            gut: ci.gut(),
            energy: ci.energy(),
            mood: ci.mood(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsReport {
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    pub check_in_count: usize,
    pub averages: Averages,
    /// Two-week view.
    pub trend: Trend,
    /// Day-to-day view; more sensitive than `trend`.
    pub momentum: Trend,
    pub top_symptoms: Vec<SymptomCount>,
    pub patterns: Vec<PatternInsight>,
    pub food_sensitivities: Vec<FoodSensitivity>,
    pub meal_quality: MealQuality,
    pub recommendations: Vec<String>,
    pub top_driver: Option<Driver>,
    pub best_day: Option<DayScore>,
    pub worst_day: Option<DayScore>,
    pub gut_series: Vec<DayScore>,
}

impl InsightsReport {
    /// Recomputes `trend` over a history longer than the report window.
    pub fn with_trend_history(mut self, history: &[CheckIn], threshold: f64) -> Self {
        self.trend = gut_trend(history, threshold);
        self
    }
}

/// Builds the full insights report for one user's window of records.
///
/// Callers pre-filter the records to the window they want. `now` is only
/// read for its UTC offset (local days and hours) and echoed back as
/// `generated_at`; nothing here looks at the wall clock.
pub fn compute_report(
    check_ins: &[CheckIn],
    meals: &[Meal],
    supplements: &[Supplement],
    now: OffsetDateTime,
    options: &ReportOptions,
) -> InsightsReport {
    let averages = averages(check_ins);
    let top_symptoms = top_symptoms(check_ins, options.top_symptoms_limit);
    let meal_quality = meal_quality(meals);

    let window = Window {
        check_ins,
        meals,
        supplements,
        offset: now.offset(),
    };
    let patterns = detect_patterns(window);
    let food_sensitivities = scan_food_sensitivities(meals, check_ins);

    let rule_inputs = RuleInputs {
        averages: &averages,
        meal_quality: &meal_quality,
        top_symptoms: &top_symptoms,
    };
    let recommendations = recommendations(rule_inputs);
    let top_driver = top_driver(rule_inputs);

    let sorted = chronological(check_ins);
    let gut_series: Vec<DayScore> = sorted.iter().map(|ci| DayScore::from(*ci)).collect();
    let best_day = sorted
        .iter()
        .rev()
        .max_by_key(|ci| ci.gut())
        .map(|ci| DayScore::from(*ci));
    let worst_day = sorted
        .iter()
        .rev()
        .min_by_key(|ci| ci.gut())
        .map(|ci| DayScore::from(*ci));

    debug!(
        check_ins = check_ins.len(),
        meals = meals.len(),
        supplements = supplements.len(),
        patterns = patterns.len(),
        sensitivities = food_sensitivities.len(),
        "insights report computed"
    );

    InsightsReport {
        generated_at: now,
        check_in_count: check_ins.len(),
        averages,
        trend: gut_trend(check_ins, options.trend_threshold),
        momentum: gut_trend(check_ins, options.momentum_threshold),
        top_symptoms,
        patterns,
        food_sensitivities,
        meal_quality,
        recommendations,
        top_driver,
        best_day,
        worst_day,
        gut_series,
    }
}
