//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::store::{Gender, LogEntry, MetricUpdate, StoreStats};

// ============================================
// USER DTOs
// ============================================

/// User registration request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Display name
    pub name: String,
    /// Age in years
    pub age: u8,
    pub gender: Gender,
}

// ============================================
// LOG DTOs
// ============================================

/// Daily log upsert request
///
/// Metric fields sit at the top level; absent fields leave the stored
/// entry untouched.
#[derive(Debug, Deserialize)]
pub struct LogUpsertRequest {
    /// Calendar day to log against, defaults to today (UTC)
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(flatten)]
    pub metrics: MetricUpdate,
}

/// Daily log upsert response
#[derive(Debug, Serialize)]
pub struct LogUpsertResponse {
    /// The merged entry after this upsert
    pub log: LogEntry,
    /// Wellness score recomputed from the refreshed week
    pub wellness_score: u8,
}

/// History window parameters
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Days back from today, defaults to 30
    #[serde(default)]
    pub days: Option<i64>,
}

/// Dashboard response
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Today's entry; synthesized with zeros (and the profile weight)
    /// when nothing was logged yet
    pub today: LogEntry,
    pub weekly_average: WeeklyAverage,
    pub wellness_score: u8,
    /// The week's entries, date ascending
    pub week: Vec<LogEntry>,
}

/// Rounded weekly averages for display
#[derive(Debug, Serialize, PartialEq)]
pub struct WeeklyAverage {
    /// Rounded to the nearest kcal
    pub calories: u32,
    /// Rounded to the nearest glass
    pub water_glasses: u32,
    /// Rounded to one decimal
    pub sleep_hours: f64,
}

// ============================================
// FOOD DTOs
// ============================================

/// Result limit parameters
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Corpus seeding response
#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub count: usize,
}

// ============================================
// CHAT DTOs
// ============================================

/// Chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Free-text question
    pub message: String,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy" or "degraded"
    pub status: String,
    /// Crate version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Store record counts, when the store is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreStats>,
}
