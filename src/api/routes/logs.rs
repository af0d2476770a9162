//! Log Routes
//!
//! Daily log upserts, history windows, CSV export, and the dashboard.
//!
//! - POST /api/v1/users/:id/logs - Upsert today's (or a given day's) log
//! - GET /api/v1/users/:id/logs/today - Today's entry
//! - GET /api/v1/users/:id/logs - History window (?days=30)
//! - GET /api/v1/users/:id/logs/export - History window as CSV download
//! - GET /api/v1/users/:id/dashboard - Today + weekly averages + score

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{NaiveTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::dto::{
    DashboardResponse, HistoryParams, LogUpsertRequest, LogUpsertResponse, WeeklyAverage,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::engine::{average, MetricField};
use crate::store::LogEntry;

/// Default history window in days
const DEFAULT_HISTORY_DAYS: i64 = 30;

/// Largest history window we will assemble in one response
const MAX_HISTORY_DAYS: i64 = 365;

/// POST /api/v1/users/:id/logs
///
/// Merge the submitted metrics into the day's entry, creating it on
/// first write, then recompute the wellness score over the refreshed
/// week.
pub async fn upsert_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(req): Json<LogUpsertRequest>,
) -> ApiResult<(StatusCode, Json<LogUpsertResponse>)> {
    let at = match req.date {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    let log = state.aggregator.upsert_daily_log(id, at, req.metrics).await?;
    let wellness_score = state.scores.recompute(id).await?;

    Ok((
        StatusCode::CREATED,
        Json(LogUpsertResponse {
            log,
            wellness_score,
        }),
    ))
}

/// GET /api/v1/users/:id/logs/today
pub async fn today_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<LogEntry>> {
    let today = Utc::now().date_naive();
    let log = state
        .store
        .log_for(id, today)
        .await?
        .ok_or_else(|| ApiError::NotFound("no log recorded today".to_string()))?;

    Ok(Json(log))
}

/// GET /api/v1/users/:id/logs?days=30
///
/// Entries from the window ending today, date ascending.
pub async fn log_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<Vec<LogEntry>>> {
    let days = validate_days(params.days)?;
    let window = state.aggregator.window(id, Utc::now().date_naive(), days).await?;

    Ok(Json(window))
}

/// GET /api/v1/users/:id/logs/export?days=30
///
/// The same window as a CSV attachment.
pub async fn export_logs(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<impl IntoResponse> {
    let days = validate_days(params.days)?;
    let window = state.aggregator.window(id, Utc::now().date_naive(), days).await?;

    let csv = window_to_csv(&window)?;
    let filename = format!("ojas_export_{}.csv", Utc::now().format("%Y%m%d_%H%M%S"));

    tracing::info!(user_id = %id, rows = window.len(), "exported log window");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}

/// GET /api/v1/users/:id/dashboard
///
/// Today's entry (synthesized with zeros and the profile weight when
/// nothing was logged), rounded weekly averages, the stored wellness
/// score, and the week's entries.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DashboardResponse>> {
    let user = state
        .store
        .user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;

    let today = Utc::now().date_naive();
    let log = match state.store.log_for(id, today).await? {
        Some(log) => log,
        None => {
            let mut empty = LogEntry::new(id, today);
            empty.weight_kg = user.weight_kg;
            empty
        }
    };

    let week = state.aggregator.weekly_window(id, today).await?;

    Ok(Json(DashboardResponse {
        today: log,
        weekly_average: weekly_average(&week),
        wellness_score: user.wellness_score,
        week,
    }))
}

/// Validate and default the `days` query parameter
fn validate_days(days: Option<i64>) -> Result<i64, ApiError> {
    let days = days.unwrap_or(DEFAULT_HISTORY_DAYS);
    if !(1..=MAX_HISTORY_DAYS).contains(&days) {
        return Err(ApiError::Validation(format!(
            "days must be between 1 and {MAX_HISTORY_DAYS}"
        )));
    }
    Ok(days)
}

/// Rounded averages over a window for display
fn weekly_average(window: &[LogEntry]) -> WeeklyAverage {
    WeeklyAverage {
        calories: average(MetricField::Calories, window).round() as u32,
        water_glasses: average(MetricField::Water, window).round() as u32,
        sleep_hours: (average(MetricField::Sleep, window) * 10.0).round() / 10.0,
    }
}

/// Render a window as CSV, oldest row first
fn window_to_csv(window: &[LogEntry]) -> Result<String, ApiError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "date",
            "weight_kg",
            "calories",
            "water_glasses",
            "sleep_hours",
            "steps",
            "mood",
        ])
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    for entry in window {
        writer
            .write_record([
                entry.date.to_string(),
                entry.weight_kg.to_string(),
                entry.calories.to_string(),
                entry.water_glasses.to_string(),
                entry.sleep_hours.to_string(),
                entry.steps.to_string(),
                format!("{:?}", entry.mood).to_lowercase(),
            ])
            .map_err(|e| ApiError::Internal(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| ApiError::Internal(e.to_string()))
}
