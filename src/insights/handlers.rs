use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use super::daily::{compute_daily_summary, DailySummary};
use super::dto::{InsightsQuery, ReportRequest, MAX_SNAPSHOT_RECORDS, MAX_WINDOW_DAYS};
use super::engine::{compute_report, InsightsReport};
use crate::auth::UserContext;
use crate::backend::DateRange;
use crate::error::{ApiError, ApiResult};
use crate::records::CheckIn;
use crate::state::AppState;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/insights", get(get_insights))
        .route("/today", get(get_today))
}

pub fn compute_routes() -> Router<AppState> {
    Router::new().route("/insights/report", post(post_report))
}

fn local_now(user: &UserContext) -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(user.utc_offset)
}

/// GET /insights?days=N
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn get_insights(
    State(state): State<AppState>,
    user: UserContext,
    Query(q): Query<InsightsQuery>,
) -> ApiResult<Json<InsightsReport>> {
    let cfg = &state.config.insights;
    let days = q.days.unwrap_or(cfg.window_days);
    if days == 0 || days > MAX_WINDOW_DAYS {
        return Err(ApiError::BadRequest(format!(
            "days must be between 1 and {MAX_WINDOW_DAYS}"
        )));
    }

    let now = local_now(&user);
    let window = DateRange::ending_on(now.date(), days);
    let history = DateRange::ending_on(now.date(), cfg.trend_window_days.max(days));

    let backend = &state.backend;
    let (history_check_ins, meals, supplements) = tokio::try_join!(
        backend.fetch_check_ins(&user, history),
        backend.fetch_meals(&user, window),
        backend.fetch_supplements(&user),
    )?;
    let check_ins: Vec<CheckIn> = history_check_ins
        .iter()
        .filter(|c| window.contains(c.date))
        .cloned()
        .collect();

    let report = compute_report(&check_ins, &meals, &supplements, now, &cfg.report)
        .with_trend_history(&history_check_ins, cfg.report.trend_threshold);
    info!(
        days,
        check_ins = report.check_in_count,
        patterns = report.patterns.len(),
        "insights served"
    );
    Ok(Json(report))
}

/// POST /insights/report: run the engine over a posted snapshot.
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn post_report(
    State(state): State<AppState>,
    user: UserContext,
    Json(body): Json<ReportRequest>,
) -> ApiResult<Json<InsightsReport>> {
    if body.record_count() > MAX_SNAPSHOT_RECORDS {
        return Err(ApiError::BadRequest(format!(
            "snapshot holds more than {MAX_SNAPSHOT_RECORDS} records"
        )));
    }
    let now = body.now.unwrap_or_else(|| local_now(&user));
    let options = body.options.unwrap_or(state.config.insights.report);

    let report = compute_report(&body.check_ins, &body.meals, &body.supplements, now, &options);
    Ok(Json(report))
}

/// GET /today: home-view summary for the caller's local today.
#[instrument(skip_all, fields(user_id = %user.user_id))]
pub async fn get_today(
    State(state): State<AppState>,
    user: UserContext,
) -> ApiResult<Json<DailySummary>> {
    let now = local_now(&user);
    let today = now.date();
    let recent = DateRange::ending_on(today, state.config.insights.window_days);

    let backend = &state.backend;
    let (recent_check_ins, meals, supplements) = tokio::try_join!(
        backend.fetch_check_ins(&user, recent),
        backend.fetch_meals(&user, DateRange::ending_on(today, 2)),
        backend.fetch_supplements(&user),
    )?;
    let today_check_in = recent_check_ins.iter().find(|c| c.date == today);

    let summary = compute_daily_summary(
        today_check_in,
        &recent_check_ins,
        &meals,
        &supplements,
        now,
        state.config.insights.report.momentum_threshold,
    );
    Ok(Json(summary))
}
