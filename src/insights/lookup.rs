//! Free-text lookups used by the detectors.
//!
//! Foods and supplements are only known by what the user typed, so matching
//! is a case-insensitive substring test. Keep every such test in here so a
//! structured tag field can replace it without touching detector code.

use crate::records::{Meal, Supplement};

pub const DAIRY_KEYWORDS: &[&str] = &["milk", "cheese", "dairy", "yogurt"];

/// True if the meal description contains any of `keywords` (lowercase).
pub fn description_mentions(meal: &Meal, keywords: &[&str]) -> bool {
    let desc = meal.description.to_lowercase();
    keywords.iter().any(|k| desc.contains(k))
}

/// True if an active cabinet entry's name contains `needle` (lowercase).
pub fn has_active_supplement_named(supplements: &[Supplement], needle: &str) -> bool {
    supplements
        .iter()
        .filter(|s| s.active)
        .any(|s| s.name.to_lowercase().contains(needle))
}
