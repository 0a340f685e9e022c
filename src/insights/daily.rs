//! Today-at-a-glance summary for the home view.

use serde::Serialize;
use time::{Date, OffsetDateTime};

use super::aggregate::averages;
use super::trend::{gut_trend, Trend};
use crate::records::{CheckIn, Meal, Supplement};

const PLANNED_MEALS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyDriver {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub emoji: &'static str,
    pub text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimpleFix {
    pub icon: &'static str,
    pub action: &'static str,
    pub impact: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Prediction {
    pub time: &'static str,
    pub issue: &'static str,
    pub fix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GutLabel {
    pub label: &'static str,
    pub sublabel: &'static str,
}

pub fn gut_label(score: f64) -> GutLabel {
    if score >= 7.0 {
        GutLabel { label: "Feeling Great!", sublabel: "Your gut is thriving today" }
    } else if score >= 5.0 {
        GutLabel { label: "Looking Good", sublabel: "Keep up the healthy choices!" }
    } else if score >= 3.0 {
        GutLabel { label: "Needs Support", sublabel: "Small adjustments can boost tomorrow" }
    } else {
        GutLabel { label: "Needs Attention", sublabel: "Let's focus on gut-friendly foods today" }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub gut: Option<f64>,
    pub energy: Option<f64>,
    pub mood: Option<f64>,
    pub gut_label: Option<GutLabel>,
    pub fiber_today: f64,
    pub sugar_today: f64,
    pub fiber_yesterday: f64,
    pub sugar_yesterday: f64,
    pub meals_today: usize,
    pub has_check_in: bool,
    pub completion_percent: u8,
    pub drivers: Vec<DailyDriver>,
    pub badge: Option<Badge>,
    pub simple_fix: SimpleFix,
    pub prediction: Prediction,
    pub momentum: Trend,
}

#[derive(Debug, Default, Clone, Copy)]
struct DayTotals {
    meals: usize,
    fiber: f64,
    sugar: f64,
}

fn totals_for(meals: &[Meal], day: Option<Date>, now: OffsetDateTime) -> DayTotals {
    let Some(day) = day else {
        return DayTotals::default();
    };
    meals
        .iter()
        .filter(|m| m.local_date(now.offset()) == day)
        .fold(DayTotals::default(), |acc, m| DayTotals {
            meals: acc.meals + 1,
            fiber: acc.fiber + m.fiber().unwrap_or(0.0),
            sugar: acc.sugar + m.sugar().unwrap_or(0.0),
        })
}

/// `meals` must cover at least today and yesterday in `now`'s offset.
/// `momentum_threshold` is normally `ReportOptions::momentum_threshold`.
pub fn compute_daily_summary(
    today_check_in: Option<&CheckIn>,
    recent_check_ins: &[CheckIn],
    meals: &[Meal],
    supplements: &[Supplement],
    now: OffsetDateTime,
    momentum_threshold: f64,
) -> DailySummary {
    let today = now.date();
    let t = totals_for(meals, Some(today), now);
    let y = totals_for(meals, today.previous_day(), now);

    let recent = averages(recent_check_ins);
    let gut = today_check_in.map(|c| c.gut() as f64).or(recent.gut);
    let energy = today_check_in.map(|c| c.energy() as f64).or(recent.energy);
    let mood = today_check_in.map(|c| c.mood() as f64).or(recent.mood);
    let has_check_in = today_check_in.is_some();

    let active_supplements = supplements.iter().filter(|s| s.active).count();
    let total_tasks = PLANNED_MEALS + 1 + active_supplements;
    let done = t.meals.min(PLANNED_MEALS) + usize::from(has_check_in);
    let completion_percent = (done as f64 * 100.0 / total_tasks as f64).round() as u8;

    let mut drivers = vec![
        DailyDriver {
            icon: "🌱",
            label: "Fiber",
            value: format!("{:.0}g", t.fiber),
            direction: if t.fiber >= 10.0 { Direction::Up } else { Direction::Down },
        },
        DailyDriver {
            icon: "🍬",
            label: "Sugar",
            value: format!("{:.0}g", t.sugar),
            direction: if t.sugar <= 15.0 { Direction::Up } else { Direction::Down },
        },
    ];
    for (icon, label, score) in [("⚡", "Energy", energy), ("🧠", "Mood", mood)] {
        if let Some(score) = score {
            drivers.push(DailyDriver {
                icon,
                label,
                value: format!("{score:.1}"),
                direction: if score >= 6.0 { Direction::Up } else { Direction::Down },
            });
        }
    }

    let bloating_days = recent_check_ins
        .iter()
        .filter(|c| c.has_symptom("bloating"))
        .count();
    let below = |v: Option<f64>, limit: f64| v.is_some_and(|v| v < limit);

    let badge = if y.fiber < 10.0 && t.fiber < 10.0 {
        Some(Badge { emoji: "🌱", text: "Low Fiber Pattern" })
    } else if y.sugar > 25.0 || t.sugar > 25.0 {
        Some(Badge { emoji: "🍬", text: "High Sugar Alert" })
    } else if below(energy, 4.0) {
        Some(Badge { emoji: "😴", text: "Energy Gap Detected" })
    } else if bloating_days >= 2 {
        Some(Badge { emoji: "🎈", text: "Bloating Pattern" })
    } else if gut.is_some_and(|g| g >= 7.0) {
        Some(Badge { emoji: "🌟", text: "Great Week!" })
    } else {
        None
    };

    let simple_fix = if t.fiber < 5.0 {
        SimpleFix { icon: "🥜", action: "Add handful of nuts/seeds", impact: "+5g fiber, better digestion" }
    } else if t.sugar > 20.0 {
        SimpleFix { icon: "💧", action: "Drink 300ml warm water now", impact: "reduces sugar cravings" }
    } else if !has_check_in {
        SimpleFix { icon: "📝", action: "Do a 30-sec check-in", impact: "unlocks personalized insights" }
    } else if t.meals < 2 {
        SimpleFix { icon: "📸", action: "Log your next meal", impact: "helps surface your patterns" }
    } else if below(energy, 5.0) {
        SimpleFix { icon: "🚶", action: "Take a 10-min walk outside", impact: "a gentle energy lift" }
    } else if below(gut, 5.0) {
        SimpleFix { icon: "🦠", action: "Eat probiotic food (yogurt/kimchi)", impact: "supports gut healing" }
    } else {
        SimpleFix { icon: "✨", action: "Keep up great habits!", impact: "you're on track" }
    };

    let prediction = if t.fiber < 5.0 {
        Prediction { time: "2-4 PM", issue: "Low energy", fix: "Add oats or fruits before lunch" }
    } else if y.sugar > 25.0 {
        Prediction { time: "Afternoon", issue: "Sugar cravings", fix: "Have protein-rich snack ready" }
    } else if below(gut, 4.0) {
        Prediction { time: "Evening", issue: "Digestive discomfort", fix: "Eat light dinner, avoid dairy" }
    } else {
        Prediction { time: "Today", issue: "Good momentum!", fix: "Maintain current habits" }
    };

    DailySummary {
        gut,
        energy,
        mood,
        gut_label: gut.map(gut_label),
        fiber_today: t.fiber,
        sugar_today: t.sugar,
        fiber_yesterday: y.fiber,
        sugar_yesterday: y.sugar,
        meals_today: t.meals,
        has_check_in,
        completion_percent,
        drivers,
        badge,
        simple_fix,
        prediction,
        momentum: gut_trend(recent_check_ins, momentum_threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::testing::{at, check_in, meal, supplement};
    use crate::insights::trend::MOMENTUM_THRESHOLD;
    use crate::records::MealType;

    fn with(d: u8, hour: u8, fiber: f64, sugar: f64) -> Meal {
        let mut m = meal(d, hour, MealType::Lunch, "bowl");
        m.fiber = Some(fiber);
        m.sugar = Some(sugar);
        m
    }

    #[test]
    fn empty_day_asks_for_basics() {
        let s = compute_daily_summary(None, &[], &[], &[], at(10, 9), MOMENTUM_THRESHOLD);
        assert_eq!(s.gut, None);
        assert_eq!(s.gut_label, None);
        assert_eq!(s.completion_percent, 0);
        assert_eq!(s.drivers.len(), 2);
        assert_eq!(s.badge, Some(Badge { emoji: "🌱", text: "Low Fiber Pattern" }));
        assert_eq!(s.simple_fix.action, "Add handful of nuts/seeds");
        assert_eq!(s.prediction.issue, "Low energy");
        assert_eq!(s.momentum, Trend::Stable);
    }

    #[test]
    fn today_check_in_wins_over_recent_average() {
        let today = check_in(10, 8, 9, 7, &[]);
        let recent = vec![check_in(8, 2, 2, 2, &[]), check_in(9, 4, 4, 4, &[])];
        let meals = vec![with(10, 8, 6.0, 2.0), with(10, 13, 6.0, 3.0), with(9, 13, 12.0, 1.0)];
        let cabinet = vec![supplement("Probiotic", true), supplement("Iron", false)];

        let s = compute_daily_summary(Some(&today), &recent, &meals, &cabinet, at(10, 18), MOMENTUM_THRESHOLD);
        assert_eq!(s.gut, Some(9.0));
        assert_eq!(s.energy, Some(8.0));
        assert_eq!(s.gut_label.map(|l| l.label), Some("Feeling Great!"));
        assert_eq!(s.fiber_today, 12.0);
        assert_eq!(s.fiber_yesterday, 12.0);
        assert_eq!(s.meals_today, 2);
        // (2 meals + check-in) / (3 meals + check-in + 1 supplement)
        assert_eq!(s.completion_percent, 60);
        assert_eq!(s.drivers.len(), 4);
        assert_eq!(s.drivers[0].direction, Direction::Up);
        assert_eq!(s.badge, Some(Badge { emoji: "🌟", text: "Great Week!" }));
        assert_eq!(s.simple_fix.action, "Keep up great habits!");
        assert_eq!(s.prediction.issue, "Good momentum!");
    }

    #[test]
    fn recent_average_fills_in_without_check_in() {
        let recent = vec![check_in(8, 3, 4, 5, &["bloating"]), check_in(9, 3, 2, 5, &["bloating"])];
        let meals = vec![with(10, 8, 11.0, 2.0)];
        let s = compute_daily_summary(None, &recent, &meals, &[], at(10, 18), MOMENTUM_THRESHOLD);
        assert_eq!(s.gut, Some(3.0));
        assert_eq!(s.badge, Some(Badge { emoji: "😴", text: "Energy Gap Detected" }));
        assert_eq!(s.simple_fix.action, "Do a 30-sec check-in");
        assert_eq!(s.prediction.issue, "Digestive discomfort");
        assert_eq!(s.momentum, Trend::Down);
    }

    #[test]
    fn high_sugar_yesterday_is_flagged() {
        let meals = vec![with(9, 20, 12.0, 30.0), with(10, 8, 12.0, 0.0)];
        let today = check_in(10, 7, 6, 7, &[]);
        let s = compute_daily_summary(Some(&today), &[], &meals, &[], at(10, 18), MOMENTUM_THRESHOLD);
        assert_eq!(s.badge, Some(Badge { emoji: "🍬", text: "High Sugar Alert" }));
        assert_eq!(s.simple_fix.action, "Log your next meal");
        assert_eq!(s.prediction.issue, "Sugar cravings");
    }

    #[test]
    fn momentum_follows_configured_threshold() {
        // first half 5, second half 5.5: up at 0.2, stable at 1.0
        let recent = vec![
            check_in(7, 5, 5, 5, &[]),
            check_in(8, 5, 5, 5, &[]),
            check_in(9, 5, 5, 5, &[]),
            check_in(10, 5, 6, 5, &[]),
        ];
        let s = compute_daily_summary(None, &recent, &[], &[], at(10, 18), MOMENTUM_THRESHOLD);
        assert_eq!(s.momentum, Trend::Up);

        let s = compute_daily_summary(None, &recent, &[], &[], at(10, 18), 1.0);
        assert_eq!(s.momentum, Trend::Stable);
    }
}
