//! Wellness scoring
//!
//! Folds the last week of entries into one bounded 0-100 number: a fixed
//! base, a consistency bonus per logged day, and per-entry bonuses for each
//! habit target hit. The score is recomputed from scratch after every log
//! upsert and persisted on the user; a week with no entries leaves the
//! stored score untouched.

use std::ops::RangeInclusive;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use super::aggregator::LogAggregator;
use super::error::{EngineError, EngineResult};
use crate::store::{LogEntry, Store};

/// Score floor before any bonuses
pub const BASE_SCORE: u32 = 50;
/// Hard cap on the final score
pub const MAX_SCORE: u8 = 100;

const DAILY_LOG_BONUS: u32 = 5;
const WATER_BONUS: u32 = 2;
const SLEEP_BONUS: u32 = 3;
const STEPS_BONUS: u32 = 2;
const CALORIE_BONUS: u32 = 2;

const WATER_GOAL_GLASSES: u32 = 8;
const SLEEP_GOAL_HOURS: RangeInclusive<f64> = 7.0..=9.0;
const STEPS_GOAL: u32 = 8000;
const CALORIE_GOAL_KCAL: RangeInclusive<u32> = 1500..=2500;

/// Score a window of daily entries; None when the window is empty
///
/// Each entry is a distinct day by construction, so the window length is the
/// consistency bonus multiplier. Monotone: satisfying one more habit target
/// never lowers the result.
pub fn score_window(window: &[LogEntry]) -> Option<u8> {
    if window.is_empty() {
        return None;
    }

    let mut score = BASE_SCORE + window.len() as u32 * DAILY_LOG_BONUS;
    for entry in window {
        if entry.water_glasses >= WATER_GOAL_GLASSES {
            score += WATER_BONUS;
        }
        if SLEEP_GOAL_HOURS.contains(&entry.sleep_hours) {
            score += SLEEP_BONUS;
        }
        if entry.steps >= STEPS_GOAL {
            score += STEPS_BONUS;
        }
        if CALORIE_GOAL_KCAL.contains(&entry.calories) {
            score += CALORIE_BONUS;
        }
    }

    Some(score.min(MAX_SCORE as u32) as u8)
}

/// Recomputes and persists users' wellness scores
pub struct ScoreEngine {
    store: Arc<dyn Store>,
    aggregator: LogAggregator,
}

impl ScoreEngine {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let aggregator = LogAggregator::new(Arc::clone(&store));
        Self { store, aggregator }
    }

    /// Recompute from the 7-day window ending today (UTC)
    pub async fn recompute(&self, user_id: Uuid) -> EngineResult<u8> {
        self.recompute_as_of(user_id, Utc::now().date_naive()).await
    }

    /// Recompute from the 7-day window ending at `as_of`
    ///
    /// An empty window returns the stored score unchanged and writes
    /// nothing; a user who stops logging is not reset.
    pub async fn recompute_as_of(&self, user_id: Uuid, as_of: NaiveDate) -> EngineResult<u8> {
        let mut user = self
            .store
            .user(user_id)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("user {user_id}")))?;

        let window = self.aggregator.weekly_window(user_id, as_of).await?;
        match score_window(&window) {
            None => {
                tracing::debug!(user_id = %user_id, "empty week, score unchanged");
                Ok(user.wellness_score)
            }
            Some(score) => {
                user.wellness_score = score;
                self.store.put_user(user).await?;
                tracing::info!(user_id = %user_id, score, days = window.len(), "recomputed wellness score");
                Ok(score)
            }
        }
    }
}
