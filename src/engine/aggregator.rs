//! Daily log aggregation
//!
//! Owns the upsert path for daily entries and the rolling-window reads the
//! score engine and dashboard build on. A day is identified by the UTC
//! calendar date of the submission instant; two submissions on the same day
//! always land in the same entry.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use super::error::{EngineError, EngineResult};
use crate::store::{LogEntry, MetricUpdate, Store};

/// Window length backing the wellness score and the dashboard
pub const WEEK_DAYS: i64 = 7;

/// One numeric metric of a log entry, for averaging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricField {
    Weight,
    Calories,
    Water,
    Sleep,
    Steps,
}

impl MetricField {
    /// Read this field's value out of an entry
    pub fn value(&self, entry: &LogEntry) -> f64 {
        match self {
            MetricField::Weight => entry.weight_kg,
            MetricField::Calories => entry.calories as f64,
            MetricField::Water => entry.water_glasses as f64,
            MetricField::Sleep => entry.sleep_hours,
            MetricField::Steps => entry.steps as f64,
        }
    }
}

/// Upserts daily entries and serves rolling windows
pub struct LogAggregator {
    store: Arc<dyn Store>,
}

impl LogAggregator {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Insert or merge one day's metrics
    ///
    /// The instant is normalized to its UTC calendar date. The entry for
    /// that date is created if missing (atomically, via the store's keyed
    /// insert), then the present fields of `update` overwrite it and the
    /// merged entry is written back.
    pub async fn upsert_daily_log(
        &self,
        user_id: Uuid,
        at: DateTime<Utc>,
        update: MetricUpdate,
    ) -> EngineResult<LogEntry> {
        validate_update(&update)?;

        if self.store.user(user_id).await?.is_none() {
            return Err(EngineError::NotFound(format!("user {user_id}")));
        }

        let date = at.date_naive();
        let mut entry = self
            .store
            .create_or_fetch_log(LogEntry::new(user_id, date))
            .await?;
        entry.apply(&update);
        self.store.put_log(entry.clone()).await?;

        tracing::debug!(user_id = %user_id, date = %date, "daily log upserted");
        Ok(entry)
    }

    /// The `days` calendar days ending at `as_of`, date ascending
    ///
    /// Empty when the user has no entries in that span; at most one entry
    /// per day by construction.
    pub async fn window(
        &self,
        user_id: Uuid,
        as_of: NaiveDate,
        days: i64,
    ) -> EngineResult<Vec<LogEntry>> {
        if days <= 0 {
            return Err(EngineError::Validation(format!(
                "window must cover at least one day, got {days}"
            )));
        }
        let from = as_of - Duration::days(days - 1);
        let mut entries = self.store.logs_since(user_id, from).await?;
        entries.retain(|e| e.date <= as_of);
        Ok(entries)
    }

    /// The 7-day window ending at `as_of`
    pub async fn weekly_window(
        &self,
        user_id: Uuid,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<LogEntry>> {
        self.window(user_id, as_of, WEEK_DAYS).await
    }
}

/// Arithmetic mean of one metric over a window; 0.0 for an empty window
pub fn average(field: MetricField, window: &[LogEntry]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let sum: f64 = window.iter().map(|e| field.value(e)).sum();
    sum / window.len() as f64
}

fn validate_update(update: &MetricUpdate) -> EngineResult<()> {
    if let Some(kg) = update.weight_kg {
        if !kg.is_finite() || kg < 0.0 {
            return Err(EngineError::Validation(format!(
                "weight_kg must be finite and non-negative, got {kg}"
            )));
        }
    }
    if let Some(hours) = update.sleep_hours {
        if !hours.is_finite() || !(0.0..=24.0).contains(&hours) {
            return Err(EngineError::Validation(format!(
                "sleep_hours must be between 0 and 24, got {hours}"
            )));
        }
    }
    Ok(())
}
