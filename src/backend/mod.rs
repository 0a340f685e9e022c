//! Seam to the hosted data store.

use async_trait::async_trait;
use time::{Date, Duration, OffsetDateTime, Time, UtcOffset};

use crate::auth::UserContext;
use crate::error::BackendError;
use crate::records::{CheckIn, CheckInDraft, Meal, Supplement};

pub mod memory;
pub mod postgres;
mod repo_types;

pub use memory::MemoryBackend;
pub use postgres::PgBackend;

/// Inclusive range of local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// The `days` days ending with `today`. Zero is treated as one.
    pub fn ending_on(today: Date, days: u16) -> Self {
        let back = i64::from(days.max(1)) - 1;
        let start = today.checked_sub(Duration::days(back)).unwrap_or(Date::MIN);
        Self { start, end: today }
    }

    pub fn contains(&self, day: Date) -> bool {
        self.start <= day && day <= self.end
    }

    /// Half-open instant bounds of the range as seen from `offset`.
    pub fn instants(&self, offset: UtcOffset) -> (OffsetDateTime, OffsetDateTime) {
        let from = self.start.with_time(Time::MIDNIGHT).assume_offset(offset);
        let to = self.end.with_time(Time::MIDNIGHT).assume_offset(offset) + Duration::days(1);
        (from, to)
    }
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Check-ins whose `date` falls in `range`, oldest first.
    async fn fetch_check_ins(
        &self,
        user: &UserContext,
        range: DateRange,
    ) -> Result<Vec<CheckIn>, BackendError>;

    /// Meals logged within `range` in the user's local time, oldest first.
    async fn fetch_meals(
        &self,
        user: &UserContext,
        range: DateRange,
    ) -> Result<Vec<Meal>, BackendError>;

    /// Supplements and medications, active or not.
    async fn fetch_supplements(&self, user: &UserContext) -> Result<Vec<Supplement>, BackendError>;

    /// Insert or replace the check-in for `draft.date`.
    async fn save_check_in(
        &self,
        user: &UserContext,
        draft: CheckInDraft,
    ) -> Result<CheckIn, BackendError>;
}
