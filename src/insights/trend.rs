//! Gut-score direction between the two halves of a window.

use serde::{Deserialize, Serialize};

use super::aggregate::{chronological, mean};
use crate::records::CheckIn;

/// Threshold for the day-to-day momentum view.
pub const MOMENTUM_THRESHOLD: f64 = 0.2;
/// Threshold for the two-week trend view.
pub const TWO_WEEK_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Compares mean gut of the first `floor(n/2)` chronological check-ins with
/// the rest. Fewer than two check-ins is always `Stable`.
pub fn gut_trend(check_ins: &[CheckIn], threshold: f64) -> Trend {
    if check_ins.len() < 2 {
        return Trend::Stable;
    }
    let sorted = chronological(check_ins);
    let (first, second) = sorted.split_at(sorted.len() / 2);

    let (Some(first_avg), Some(second_avg)) = (
        mean(first.iter().map(|c| c.gut() as f64)),
        mean(second.iter().map(|c| c.gut() as f64)),
    ) else {
        return Trend::Stable;
    };

    let delta = second_avg - first_avg;
    if delta > threshold {
        Trend::Up
    } else if -delta > threshold {
        Trend::Down
    } else {
        Trend::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::testing::check_in;

    fn series(guts: &[i32]) -> Vec<CheckIn> {
        guts.iter()
            .enumerate()
            .map(|(i, g)| check_in(i as u8 + 1, 5, *g, 5, &[]))
            .collect()
    }

    #[test]
    fn empty_and_single_are_stable() {
        assert_eq!(gut_trend(&[], TWO_WEEK_THRESHOLD), Trend::Stable);
        assert_eq!(gut_trend(&series(&[1]), MOMENTUM_THRESHOLD), Trend::Stable);
        assert_eq!(gut_trend(&series(&[10]), 0.0), Trend::Stable);
    }

    #[test]
    fn falling_week_is_down() {
        let cis = series(&[8, 8, 8, 8, 3, 3, 3]);
        assert_eq!(gut_trend(&cis, TWO_WEEK_THRESHOLD), Trend::Down);
    }

    #[test]
    fn sorts_before_splitting() {
        let mut cis = series(&[2, 2, 9, 9]);
        cis.reverse();
        assert_eq!(gut_trend(&cis, TWO_WEEK_THRESHOLD), Trend::Up);
    }

    #[test]
    fn thresholds_differ_between_views() {
        // first half 5.0, second half 5.333
        let cis = series(&[5, 5, 5, 5, 6]);
        assert_eq!(gut_trend(&cis, MOMENTUM_THRESHOLD), Trend::Up);
        assert_eq!(gut_trend(&cis, TWO_WEEK_THRESHOLD), Trend::Stable);
    }
}
