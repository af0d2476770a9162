//! Ojas analytics engines
//!
//! Deterministic rule evaluation over the store's records:
//!
//! - **aggregator**: daily log upsert and rolling windows
//! - **score**: bounded 0-100 wellness score
//! - **classify**: BMI-derived dosha and profile updates
//! - **recommend**: corpus filters (personalized, by condition, featured)
//! - **error**: error types
//!
//! Engines are stateless request handlers over an `Arc<dyn Store>`; all
//! mutation happens through the store, never in engine-held caches.

pub mod aggregator;
pub mod classify;
pub mod error;
pub mod recommend;
pub mod score;

// Re-export commonly used items
pub use aggregator::{average, LogAggregator, MetricField, WEEK_DAYS};
pub use classify::{bmi, classify, ClassificationEngine};
pub use error::{EngineError, EngineResult};
pub use recommend::{
    featured, filter_by_benefit, filter_by_condition, recommend, remedy_of_day,
    CHAT_SUGGESTION_LIMIT, CONDITION_LIMIT, FEATURED_LIMIT, PERSONALIZED_LIMIT,
};
pub use score::{score_window, ScoreEngine, BASE_SCORE, MAX_SCORE};
