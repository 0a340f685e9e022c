use serde::Deserialize;
use time::OffsetDateTime;

use super::engine::ReportOptions;
use crate::records::{CheckIn, Meal, Supplement};

/// Upper bound on records accepted in a posted snapshot.
pub const MAX_SNAPSHOT_RECORDS: usize = 5_000;
pub const MAX_WINDOW_DAYS: u16 = 90;

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    pub days: Option<u16>,
}

/// A caller-supplied snapshot to run the engine over.
#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub check_ins: Vec<CheckIn>,
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default)]
    pub supplements: Vec<Supplement>,
    /// Defaults to the server clock in the caller's offset.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub now: Option<OffsetDateTime>,
    #[serde(default)]
    pub options: Option<ReportOptions>,
}

impl ReportRequest {
    pub fn record_count(&self) -> usize {
        self.check_ins.len() + self.meals.len() + self.supplements.len()
    }
}
