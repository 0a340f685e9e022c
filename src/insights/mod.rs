//! Insights engine: pure functions from a window of records to a report.
//!
//! Nothing in here does I/O or reads the clock. `handlers` is the only
//! async surface and it only fetches, calls the engine and serializes.

pub mod aggregate;
pub mod daily;
mod dto;
pub mod engine;
pub mod handlers;
pub mod lookup;
pub mod patterns;
pub mod recommend;
pub mod sensitivity;
pub mod trend;

#[cfg(test)]
pub(crate) mod testing;

use crate::state::AppState;
use axum::Router;

pub use daily::{compute_daily_summary, DailySummary};
pub use engine::{compute_report, InsightsReport, ReportOptions};
pub use trend::{Trend, MOMENTUM_THRESHOLD, TWO_WEEK_THRESHOLD};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::read_routes())
        .merge(handlers::compute_routes())
}
