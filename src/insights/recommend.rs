//! Rule cascade turning aggregates into short suggestions.

use serde::Serialize;

use super::aggregate::{Averages, MealQuality, SymptomCount};
use crate::records::symptom_info;

pub const MAX_RECOMMENDATIONS: usize = 3;

pub const FIBER_TARGET: f64 = 5.0;
pub const SUGAR_LIMIT: f64 = 15.0;
pub const LOW_GUT_AVG: f64 = 5.0;
pub const LOW_ENERGY_AVG: f64 = 5.0;

pub const FALLBACK_RECOMMENDATION: &str = "Keep up your healthy habits! Your patterns look good.";

/// Inputs the cascade reads. Averages that are `None` never trigger a rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleInputs<'a> {
    pub averages: &'a Averages,
    pub meal_quality: &'a MealQuality,
    pub top_symptoms: &'a [SymptomCount],
}

fn below(value: Option<f64>, limit: f64) -> bool {
    value.is_some_and(|v| v < limit)
}

fn above(value: Option<f64>, limit: f64) -> bool {
    value.is_some_and(|v| v > limit)
}

pub fn recommendations(inputs: RuleInputs<'_>) -> Vec<String> {
    let RuleInputs {
        averages,
        meal_quality: quality,
        top_symptoms,
    } = inputs;

    let rules: [(bool, &str); 5] = [
        (
            below(quality.avg_fiber_per_meal, FIBER_TARGET),
            "Increase fiber: Add oats, berries, or leafy greens to each meal",
        ),
        (
            above(quality.avg_sugar_per_meal, SUGAR_LIMIT),
            "Reduce sugar: Swap processed snacks for whole foods",
        ),
        (
            below(averages.gut, LOW_GUT_AVG) && top_symptoms.iter().any(|s| s.symptom == "bloating"),
            "For bloating: Eat slowly, avoid carbonated drinks, try peppermint tea",
        ),
        (
            below(averages.energy, LOW_ENERGY_AVG),
            "Boost energy: Check B12 levels and sleep quality",
        ),
        (
            quality.to_avoid_count > quality.gut_friendly_count,
            "Your meals trend low on gut-friendliness. Try more whole foods.",
        ),
    ];

    let mut recs: Vec<String> = rules
        .into_iter()
        .filter(|(fired, _)| *fired)
        .map(|(_, text)| text.to_string())
        .take(MAX_RECOMMENDATIONS)
        .collect();

    if recs.is_empty() {
        recs.push(FALLBACK_RECOMMENDATION.to_string());
    }
    recs
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Driver {
    pub emoji: String,
    pub label: String,
    pub impact: String,
    pub detail: String,
}

/// The single biggest factor of the week, if any stands out.
pub fn top_driver(inputs: RuleInputs<'_>) -> Option<Driver> {
    let RuleInputs {
        averages,
        meal_quality: quality,
        top_symptoms,
    } = inputs;

    if let Some(fiber) = quality.avg_fiber_per_meal {
        if fiber < FIBER_TARGET && quality.meal_count >= 3 {
            return Some(Driver {
                emoji: "🥬".into(),
                label: "Low Fiber Intake".into(),
                impact: "Impacting: Gut, Energy, Mood".into(),
                detail: format!("Avg {fiber:.0}g/meal (aim for 8g+)"),
            });
        }
    }

    if let Some(sugar) = quality.avg_sugar_per_meal.filter(|s| *s > SUGAR_LIMIT) {
        return Some(Driver {
            emoji: "🍬".into(),
            label: "High Sugar Consumption".into(),
            impact: "Impacting: Gut inflammation, Energy crashes".into(),
            detail: format!("Avg {sugar:.0}g/meal (aim for <10g)"),
        });
    }

    if let Some(top) = top_symptoms.first().filter(|s| s.count >= 3) {
        let info = symptom_info(&top.symptom);
        return Some(Driver {
            emoji: info.map_or("⚠️", |i| i.emoji).into(),
            label: format!("Frequent {}", info.map_or("Symptoms", |i| i.label)),
            impact: "Impacting: Daily comfort, Quality of life".into(),
            detail: format!("Occurred {} times this week", top.count),
        });
    }

    averages.energy.filter(|e| *e < 4.0).map(|energy| Driver {
        emoji: "😴".into(),
        label: "Low Energy Pattern".into(),
        impact: "Impacting: Productivity, Mood".into(),
        detail: format!("Avg energy {energy:.1}/10"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quality() -> MealQuality {
        MealQuality {
            meal_count: 4,
            avg_gut_score: Some(7.5),
            avg_fiber_per_meal: Some(8.0),
            avg_sugar_per_meal: Some(6.0),
            gut_friendly_count: 3,
            to_avoid_count: 0,
        }
    }

    fn averages(energy: f64, gut: f64) -> Averages {
        Averages {
            energy: Some(energy),
            gut: Some(gut),
            mood: Some(7.0),
        }
    }

    fn bloating(count: usize) -> Vec<SymptomCount> {
        vec![SymptomCount {
            symptom: "bloating".into(),
            label: "Bloating".into(),
            count,
        }]
    }

    #[test]
    fn nothing_fires_gives_fallback() {
        let avg = averages(7.0, 7.0);
        let q = quality();
        let recs = recommendations(RuleInputs {
            averages: &avg,
            meal_quality: &q,
            top_symptoms: &[],
        });
        assert_eq!(recs, vec![FALLBACK_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn missing_data_does_not_fire_rules() {
        let avg = Averages { energy: None, gut: None, mood: None };
        let q = MealQuality {
            meal_count: 0,
            avg_gut_score: None,
            avg_fiber_per_meal: None,
            avg_sugar_per_meal: None,
            gut_friendly_count: 0,
            to_avoid_count: 0,
        };
        let recs = recommendations(RuleInputs {
            averages: &avg,
            meal_quality: &q,
            top_symptoms: &[],
        });
        assert_eq!(recs, vec![FALLBACK_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn cascade_keeps_order_and_caps_at_three() {
        let avg = averages(3.0, 4.0);
        let q = MealQuality {
            avg_fiber_per_meal: Some(2.0),
            avg_sugar_per_meal: Some(20.0),
            gut_friendly_count: 0,
            to_avoid_count: 2,
            ..quality()
        };
        let symptoms = bloating(2);
        let recs = recommendations(RuleInputs {
            averages: &avg,
            meal_quality: &q,
            top_symptoms: &symptoms,
        });
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert!(recs[0].starts_with("Increase fiber"));
        assert!(recs[1].starts_with("Reduce sugar"));
        assert!(recs[2].starts_with("For bloating"));
    }

    #[test]
    fn bloating_rule_needs_low_gut() {
        let avg = averages(7.0, 6.0);
        let q = quality();
        let symptoms = bloating(5);
        let recs = recommendations(RuleInputs {
            averages: &avg,
            meal_quality: &q,
            top_symptoms: &symptoms,
        });
        assert_eq!(recs, vec![FALLBACK_RECOMMENDATION.to_string()]);
    }

    #[test]
    fn driver_prefers_fiber_then_symptoms() {
        let avg = averages(3.0, 6.0);
        let low_fiber = MealQuality {
            avg_fiber_per_meal: Some(2.4),
            ..quality()
        };
        let symptoms = bloating(4);
        let driver = top_driver(RuleInputs {
            averages: &avg,
            meal_quality: &low_fiber,
            top_symptoms: &symptoms,
        })
        .expect("driver");
        assert_eq!(driver.label, "Low Fiber Intake");
        assert_eq!(driver.detail, "Avg 2g/meal (aim for 8g+)");

        let q = quality();
        let driver = top_driver(RuleInputs {
            averages: &avg,
            meal_quality: &q,
            top_symptoms: &symptoms,
        })
        .expect("driver");
        assert_eq!(driver.label, "Frequent Bloating");
        assert_eq!(driver.emoji, "🎈");
    }

    #[test]
    fn no_driver_for_a_good_week() {
        let avg = averages(7.0, 7.0);
        let q = quality();
        assert_eq!(
            top_driver(RuleInputs {
                averages: &avg,
                meal_quality: &q,
                top_symptoms: &[],
            }),
            None
        );
    }
}
