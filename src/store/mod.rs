//! Ojas persistence layer
//!
//! This module provides keyed storage for the three record kinds the engines
//! work over:
//!
//! - **types**: Core records (User, LogEntry, CorpusItem) and partial updates
//! - **memory**: In-memory backend for tests and demos
//! - **sqlite**: Durable SQLite backend (production default)
//! - **error**: Error types
//!
//! All backends implement the [`Store`] trait. The one write with special
//! semantics is [`Store::create_or_fetch_log`]: it atomically inserts a log
//! entry if none exists for its (user, date) key and returns the stored entry
//! otherwise, so two concurrent upserts for the same day can never produce
//! two entries.
//!
//! # Example
//!
//! ```rust,no_run
//! use ojas::store::{Gender, MemoryStore, Store, User};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MemoryStore::new();
//!
//!     let user = User::new("Asha", 31, Gender::Female);
//!     let id = user.id;
//!     store.put_user(user).await?;
//!
//!     let loaded = store.user(id).await?;
//!     assert!(loaded.is_some());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod types;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export commonly used types
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use types::{
    normalize_tags, ActivityLevel, CorpusItem, Dosha, FoodCategory, Gender, LogEntry,
    MetricUpdate, Mood, Nutrients, ProfileUpdate, Taste, User, DEFAULT_WELLNESS_SCORE,
};

/// Record counts for health checks and demos
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreStats {
    pub users: usize,
    pub log_entries: usize,
    pub corpus_items: usize,
}

/// Keyed storage contract shared by all backends
///
/// Every method returns `StoreResult`; engines propagate `StoreError`
/// unchanged. Implementations must be safe to share behind an `Arc` across
/// request handlers.
#[async_trait]
pub trait Store: Send + Sync {
    /// Fetch a user by id
    async fn user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Insert or overwrite a user record
    async fn put_user(&self, user: User) -> StoreResult<()>;

    /// Atomically insert `entry` unless one exists for its (user, date) key
    ///
    /// Returns the entry that is in the store after the call: the given one
    /// when it was inserted, the pre-existing one otherwise.
    async fn create_or_fetch_log(&self, entry: LogEntry) -> StoreResult<LogEntry>;

    /// Overwrite the log entry for its (user, date) key
    async fn put_log(&self, entry: LogEntry) -> StoreResult<()>;

    /// Fetch one day's entry for a user
    async fn log_for(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<Option<LogEntry>>;

    /// All entries for a user with date >= `from`, ordered by date ascending
    async fn logs_since(&self, user_id: Uuid, from: NaiveDate) -> StoreResult<Vec<LogEntry>>;

    /// The whole remedy catalog in seed order
    async fn foods(&self) -> StoreResult<Vec<CorpusItem>>;

    /// Replace the remedy catalog, returning the new item count
    async fn seed_foods(&self, items: Vec<CorpusItem>) -> StoreResult<usize>;

    /// Record counts, also serving as a liveness probe
    async fn stats(&self) -> StoreResult<StoreStats>;
}
