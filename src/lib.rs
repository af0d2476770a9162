//! # Ojas
//!
//! Ayurvedic Wellness Tracking - A full-stack Rust application for logging
//! daily health metrics and turning them into scores, classifications, and
//! food guidance.
//!
//! ## Features
//!
//! - **Daily logs**: One entry per user per calendar day, merged on re-submit
//! - **Wellness scoring**: Bounded 0-100 score over the trailing week
//! - **Dosha classification**: BMI-banded vata / pitta / kapha profiles
//! - **Food guidance**: Condition- and dosha-aware picks from a remedy corpus
//! - **Rule-based chat**: Keyword-routed answers grounded in the corpus
//!
//! ## Modules
//!
//! - [`store`]: Persistence contract with SQLite and in-memory backends
//! - [`engine`]: Aggregation, scoring, classification, and recommendations
//! - [`chat`]: The keyword rule book and dispatcher
//! - [`corpus`]: The built-in food corpus
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ojas::engine::{ClassificationEngine, LogAggregator, ScoreEngine};
//! use ojas::store::{Gender, MemoryStore, MetricUpdate, ProfileUpdate, Store, User};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
//!
//!     // Register a user
//!     let user = User::new("Asha", 34, Gender::Female);
//!     let user_id = user.id;
//!     store.put_user(user).await?;
//!
//!     // Classify from measurements
//!     let classifier = ClassificationEngine::new(Arc::clone(&store));
//!     let update = ProfileUpdate::new().height(172.0).weight(65.0);
//!     let user = classifier.update_profile(user_id, update).await?;
//!     println!("dosha: {:?}", user.dosha);
//!
//!     // Log today and recompute the wellness score
//!     let aggregator = LogAggregator::new(Arc::clone(&store));
//!     let update = MetricUpdate::new().water(8).sleep(7.5);
//!     aggregator.upsert_daily_log(user_id, chrono::Utc::now(), update).await?;
//!
//!     let scores = ScoreEngine::new(Arc::clone(&store));
//!     let score = scores.recompute(user_id).await?;
//!     println!("wellness score: {score}");
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chat;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod store;

// Re-export top-level types for convenience
pub use store::{
    ActivityLevel, CorpusItem, Dosha, Gender, LogEntry, MemoryStore, MetricUpdate, Mood,
    ProfileUpdate, SqliteStore, Store, StoreError, StoreResult, StoreStats, User,
};

pub use engine::{
    average, bmi, classify, recommend, score_window, ClassificationEngine, EngineError,
    EngineResult, LogAggregator, MetricField, ScoreEngine,
};

pub use chat::{Dispatcher, IntentRule, Reply};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    ApiConfig as ConfigApiConfig, Config, ConfigError, LoggingConfig, StoreBackend, StoreConfig,
};
