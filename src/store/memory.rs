//! In-memory store backend
//!
//! Keeps all records in maps behind one async RwLock; `create_or_fetch_log`
//! runs under a single write acquisition, which makes the uniqueness check
//! and the insert atomic. Nothing survives process exit. Used by tests and
//! the demo binary.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::StoreResult;
use super::types::{CorpusItem, LogEntry, User};
use super::{Store, StoreStats};

#[derive(Default)]
struct Records {
    users: HashMap<Uuid, User>,
    logs: HashMap<(Uuid, NaiveDate), LogEntry>,
    foods: Vec<CorpusItem>,
}

/// Volatile store over in-process maps
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Records::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.records.read().await.users.get(&id).cloned())
    }

    async fn put_user(&self, user: User) -> StoreResult<()> {
        self.records.write().await.users.insert(user.id, user);
        Ok(())
    }

    async fn create_or_fetch_log(&self, entry: LogEntry) -> StoreResult<LogEntry> {
        let mut records = self.records.write().await;
        let key = (entry.user_id, entry.date);
        Ok(records.logs.entry(key).or_insert(entry).clone())
    }

    async fn put_log(&self, entry: LogEntry) -> StoreResult<()> {
        let mut records = self.records.write().await;
        records.logs.insert((entry.user_id, entry.date), entry);
        Ok(())
    }

    async fn log_for(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<Option<LogEntry>> {
        Ok(self.records.read().await.logs.get(&(user_id, date)).cloned())
    }

    async fn logs_since(&self, user_id: Uuid, from: NaiveDate) -> StoreResult<Vec<LogEntry>> {
        let records = self.records.read().await;
        let mut entries: Vec<LogEntry> = records
            .logs
            .values()
            .filter(|e| e.user_id == user_id && e.date >= from)
            .cloned()
            .collect();
        entries.sort_by_key(|e| e.date);
        Ok(entries)
    }

    async fn foods(&self) -> StoreResult<Vec<CorpusItem>> {
        Ok(self.records.read().await.foods.clone())
    }

    async fn seed_foods(&self, items: Vec<CorpusItem>) -> StoreResult<usize> {
        let mut records = self.records.write().await;
        let count = items.len();
        records.foods = items;
        Ok(count)
    }

    async fn stats(&self) -> StoreResult<StoreStats> {
        let records = self.records.read().await;
        Ok(StoreStats {
            users: records.users.len(),
            log_entries: records.logs.len(),
            corpus_items: records.foods.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::types::Gender;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_user_roundtrip() {
        let store = MemoryStore::new();
        let user = User::new("Asha", 31, Gender::Female);
        let id = user.id;

        store.put_user(user.clone()).await.unwrap();
        assert_eq!(store.user(id).await.unwrap(), Some(user));
        assert_eq!(store.user(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_or_fetch_returns_existing() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();

        let mut first = LogEntry::new(user_id, date(2024, 3, 1));
        first.water_glasses = 8;
        let stored = store.create_or_fetch_log(first.clone()).await.unwrap();
        assert_eq!(stored.water_glasses, 8);

        // Second create for the same day must yield the first entry untouched
        let mut second = LogEntry::new(user_id, date(2024, 3, 1));
        second.water_glasses = 3;
        let stored = store.create_or_fetch_log(second).await.unwrap();
        assert_eq!(stored.water_glasses, 8);

        assert_eq!(store.stats().await.unwrap().log_entries, 1);
    }

    #[tokio::test]
    async fn test_concurrent_create_never_splits_a_day() {
        let store = Arc::new(MemoryStore::new());
        let user_id = Uuid::new_v4();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .create_or_fetch_log(LogEntry::new(user_id, date(2024, 3, 1)))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.stats().await.unwrap().log_entries, 1);
    }

    #[tokio::test]
    async fn test_logs_since_orders_and_cuts_off() {
        let store = MemoryStore::new();
        let user_id = Uuid::new_v4();

        for day in [5, 1, 3, 9] {
            store
                .put_log(LogEntry::new(user_id, date(2024, 3, day)))
                .await
                .unwrap();
        }
        // Another user's entries never leak in
        store
            .put_log(LogEntry::new(Uuid::new_v4(), date(2024, 3, 4)))
            .await
            .unwrap();

        let entries = store.logs_since(user_id, date(2024, 3, 3)).await.unwrap();
        let dates: Vec<NaiveDate> = entries.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2024, 3, 3), date(2024, 3, 5), date(2024, 3, 9)]);
    }

    #[tokio::test]
    async fn test_seed_foods_replaces_catalog() {
        let store = MemoryStore::new();
        let count = store.seed_foods(crate::corpus::defaults()).await.unwrap();
        assert_eq!(count, 8);

        let count = store.seed_foods(Vec::new()).await.unwrap();
        assert_eq!(count, 0);
        assert!(store.foods().await.unwrap().is_empty());
    }
}
