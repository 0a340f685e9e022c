//! Read-only snapshots of the records the hosted backend owns.
//!
//! The insights engine never mutates these. Accessors on each record do the
//! clamping and sanitising, so detectors can trust what they read.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, UtcOffset};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

pub const SCORE_MIN: i32 = 1;
pub const SCORE_MAX: i32 = 10;

/// Clamps a self-reported score into `[1, 10]`.
pub fn clamp_score(raw: i32) -> i32 {
    raw.clamp(SCORE_MIN, SCORE_MAX)
}

/// Negative and non-finite nutrition values are treated as absent.
fn sanitize_amount(raw: Option<f64>) -> Option<f64> {
    raw.filter(|v| v.is_finite() && *v >= 0.0)
}

/// One daily self-report. At most one per user per `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub energy: i32,
    pub gut: i32,
    pub mood: i32,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// When the record was written; used for hour-level windows.
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

impl CheckIn {
    pub fn energy(&self) -> i32 {
        clamp_score(self.energy)
    }

    pub fn gut(&self) -> i32 {
        clamp_score(self.gut)
    }

    pub fn mood(&self) -> i32 {
        clamp_score(self.mood)
    }

    pub fn has_symptom(&self, id: &str) -> bool {
        self.symptoms.iter().any(|s| s == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub meal_type: MealType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub calories: Option<f64>,
    #[serde(default)]
    pub protein: Option<f64>,
    #[serde(default)]
    pub carbs: Option<f64>,
    #[serde(default)]
    pub fat: Option<f64>,
    #[serde(default)]
    pub fiber: Option<f64>,
    #[serde(default)]
    pub sugar: Option<f64>,
    #[serde(default)]
    pub gut_score: Option<f64>,
    #[serde(default)]
    pub ai_analysis: Option<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
}

impl Meal {
    pub fn fiber(&self) -> Option<f64> {
        sanitize_amount(self.fiber)
    }

    pub fn sugar(&self) -> Option<f64> {
        sanitize_amount(self.sugar)
    }

    /// Gut score clamped to `[0, 10]`; absent when missing or not a number.
    pub fn gut_score(&self) -> Option<f64> {
        self.gut_score
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 10.0))
    }

    /// Calendar day of the meal as seen from `offset`.
    pub fn local_date(&self, offset: UtcOffset) -> Date {
        self.logged_at.to_offset(offset).date()
    }

    pub fn local_hour(&self, offset: UtcOffset) -> u8 {
        self.logged_at.to_offset(offset).hour()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplementKind {
    #[default]
    Supplement,
    Medication,
}

/// A supplement or medication in the user's cabinet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub kind: SupplementKind,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
}

pub const SYMPTOMS: [SymptomInfo; 12] = [
    SymptomInfo { id: "bloating", label: "Bloating", emoji: "🎈" },
    SymptomInfo { id: "gas", label: "Gas", emoji: "💨" },
    SymptomInfo { id: "cramping", label: "Cramping", emoji: "😣" },
    SymptomInfo { id: "nausea", label: "Nausea", emoji: "🤢" },
    SymptomInfo { id: "heartburn", label: "Heartburn", emoji: "🔥" },
    SymptomInfo { id: "constipation", label: "Constipation", emoji: "🚫" },
    SymptomInfo { id: "diarrhea", label: "Diarrhea", emoji: "💧" },
    SymptomInfo { id: "fatigue", label: "Fatigue", emoji: "😴" },
    SymptomInfo { id: "headache", label: "Headache", emoji: "🤕" },
    SymptomInfo { id: "brain_fog", label: "Brain Fog", emoji: "🌫️" },
    SymptomInfo { id: "anxiety", label: "Anxiety", emoji: "😰" },
    SymptomInfo { id: "skin_issues", label: "Skin Issues", emoji: "🔴" },
];

pub fn symptom_info(id: &str) -> Option<&'static SymptomInfo> {
    SYMPTOMS.iter().find(|s| s.id == id)
}

/// Display label for a symptom id; unknown ids are shown as-is.
pub fn symptom_label(id: &str) -> String {
    symptom_info(id)
        .map(|s| s.label.to_string())
        .unwrap_or_else(|| id.to_string())
}

/// Check-in as submitted by the client, before normalisation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCheckIn {
    pub energy: f64,
    pub gut: f64,
    pub mood: f64,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Normalised check-in ready to be upserted for a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckInDraft {
    #[serde(with = "iso_date")]
    pub date: Date,
    pub energy: i32,
    pub gut: i32,
    pub mood: i32,
    pub symptoms: Vec<String>,
    pub notes: Option<String>,
}

fn round_score(raw: f64) -> i32 {
    if raw.is_finite() {
        clamp_score(raw.round() as i32)
    } else {
        SCORE_MIN
    }
}

impl NewCheckIn {
    pub fn normalized(self, date: Date) -> CheckInDraft {
        let mut symptoms: Vec<String> = Vec::with_capacity(self.symptoms.len());
        for s in self.symptoms {
            let s = s.trim().to_string();
            if !s.is_empty() && !symptoms.contains(&s) {
                symptoms.push(s);
            }
        }
        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        CheckInDraft {
            date,
            energy: round_score(self.energy),
            gut: round_score(self.gut),
            mood: round_score(self.mood),
            symptoms,
            notes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    fn meal() -> Meal {
        Meal {
            meal_type: MealType::Dinner,
            description: "pasta".into(),
            calories: None,
            protein: None,
            carbs: None,
            fat: None,
            fiber: Some(-3.0),
            sugar: Some(f64::NAN),
            gut_score: Some(12.5),
            ai_analysis: None,
            tips: vec![],
            logged_at: datetime!(2025-03-10 22:30 UTC),
        }
    }

    #[test]
    fn malformed_nutrition_is_treated_as_absent() {
        let m = meal();
        assert_eq!(m.fiber(), None);
        assert_eq!(m.sugar(), None);
        assert_eq!(m.gut_score(), Some(10.0));
    }

    #[test]
    fn local_date_follows_offset() {
        let m = meal();
        let plus_two = UtcOffset::from_hms(2, 0, 0).unwrap();
        assert_eq!(m.local_date(UtcOffset::UTC), date!(2025 - 03 - 10));
        assert_eq!(m.local_date(plus_two), date!(2025 - 03 - 11));
        assert_eq!(m.local_hour(plus_two), 0);
    }

    #[test]
    fn check_in_scores_are_clamped_on_read() {
        let ci = CheckIn {
            date: date!(2025 - 03 - 10),
            energy: 0,
            gut: 14,
            mood: 5,
            symptoms: vec![],
            notes: None,
            logged_at: datetime!(2025-03-10 08:00 UTC),
        };
        assert_eq!((ci.energy(), ci.gut(), ci.mood()), (1, 10, 5));
    }

    #[test]
    fn new_check_in_is_rounded_clamped_and_deduplicated() {
        let draft = NewCheckIn {
            energy: 7.6,
            gut: -2.0,
            mood: f64::INFINITY,
            symptoms: vec!["gas".into(), " gas ".into(), "".into(), "bloating".into()],
            notes: Some("   ".into()),
        }
        .normalized(date!(2025 - 03 - 10));

        assert_eq!(draft.energy, 8);
        assert_eq!(draft.gut, 1);
        assert_eq!(draft.mood, 1);
        assert_eq!(draft.symptoms, vec!["gas".to_string(), "bloating".to_string()]);
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn deserializes_wire_shape() {
        let raw = serde_json::json!({
            "date": "2025-03-10",
            "energy": 6,
            "gut": 7,
            "mood": 8,
            "symptoms": ["gas"],
            "logged_at": "2025-03-10T08:00:00Z"
        });
        let ci: CheckIn = serde_json::from_value(raw).expect("check-in parses");
        assert_eq!(ci.date, date!(2025 - 03 - 10));
        assert!(ci.has_symptom("gas"));
        assert_eq!(symptom_label("gas"), "Gas");
        assert_eq!(symptom_label("mystery"), "mystery");
    }
}
