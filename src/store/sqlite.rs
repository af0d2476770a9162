//! SQLite store backend
//!
//! One database file with three tables, each carrying its lookup keys as
//! columns and the full record as JSON. The (user_id, date) primary key on
//! the log table is what makes `create_or_fetch_log` race-proof: `INSERT OR
//! IGNORE` either lands the row or leaves the existing one, never both.
//!
//! The connection sits behind a `std::sync::Mutex` because SQLite
//! connections are not Sync; every call holds the lock only across short
//! synchronous statement work.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use uuid::Uuid;

use super::error::{StoreError, StoreResult};
use super::types::{CorpusItem, LogEntry, User};
use super::{Store, StoreStats};

/// Durable store over a single SQLite database file
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: PathBuf,
}

impl SqliteStore {
    /// Create or open the database at `data_dir/ojas.db`
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let path = data_dir.join("ojas.db");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
            ",
        )?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                record TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS health_logs (
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                record TEXT NOT NULL,
                PRIMARY KEY (user_id, date)
            );
            CREATE TABLE IF NOT EXISTS foods (
                position INTEGER PRIMARY KEY,
                record TEXT NOT NULL
            );",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached("SELECT record FROM users WHERE id = ?1")?;
        let record: Option<String> = stmt
            .query_row(params![id.to_string()], |row| row.get(0))
            .optional()?;

        match record {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put_user(&self, user: User) -> StoreResult<()> {
        let conn = self.lock()?;
        let record = serde_json::to_string(&user)?;
        let mut stmt =
            conn.prepare_cached("INSERT OR REPLACE INTO users (id, record) VALUES (?1, ?2)")?;
        stmt.execute(params![user.id.to_string(), record])?;
        Ok(())
    }

    async fn create_or_fetch_log(&self, entry: LogEntry) -> StoreResult<LogEntry> {
        let conn = self.lock()?;
        let record = serde_json::to_string(&entry)?;

        // The primary key arbitrates: a concurrent insert for the same day
        // leaves exactly one row, and the read-back returns whichever won.
        let mut insert = conn.prepare_cached(
            "INSERT OR IGNORE INTO health_logs (user_id, date, record) VALUES (?1, ?2, ?3)",
        )?;
        insert.execute(params![
            entry.user_id.to_string(),
            entry.date.to_string(),
            record
        ])?;

        let mut select = conn
            .prepare_cached("SELECT record FROM health_logs WHERE user_id = ?1 AND date = ?2")?;
        let stored: String = select.query_row(
            params![entry.user_id.to_string(), entry.date.to_string()],
            |row| row.get(0),
        )?;
        Ok(serde_json::from_str(&stored)?)
    }

    async fn put_log(&self, entry: LogEntry) -> StoreResult<()> {
        let conn = self.lock()?;
        let record = serde_json::to_string(&entry)?;
        let mut stmt = conn.prepare_cached(
            "INSERT OR REPLACE INTO health_logs (user_id, date, record) VALUES (?1, ?2, ?3)",
        )?;
        stmt.execute(params![
            entry.user_id.to_string(),
            entry.date.to_string(),
            record
        ])?;
        Ok(())
    }

    async fn log_for(&self, user_id: Uuid, date: NaiveDate) -> StoreResult<Option<LogEntry>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare_cached("SELECT record FROM health_logs WHERE user_id = ?1 AND date = ?2")?;
        let record: Option<String> = stmt
            .query_row(params![user_id.to_string(), date.to_string()], |row| {
                row.get(0)
            })
            .optional()?;

        match record {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn logs_since(&self, user_id: Uuid, from: NaiveDate) -> StoreResult<Vec<LogEntry>> {
        let conn = self.lock()?;
        // ISO dates sort lexicographically, so string comparison is date order
        let mut stmt = conn.prepare_cached(
            "SELECT record FROM health_logs
             WHERE user_id = ?1 AND date >= ?2
             ORDER BY date ASC",
        )?;
        let rows = stmt.query_map(params![user_id.to_string(), from.to_string()], |row| {
            row.get::<_, String>(0)
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(serde_json::from_str(&row?)?);
        }
        Ok(entries)
    }

    async fn foods(&self) -> StoreResult<Vec<CorpusItem>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached("SELECT record FROM foods ORDER BY position ASC")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut items = Vec::new();
        for row in rows {
            items.push(serde_json::from_str(&row?)?);
        }
        Ok(items)
    }

    async fn seed_foods(&self, items: Vec<CorpusItem>) -> StoreResult<usize> {
        let mut conn = self.lock()?;
        let count = items.len();

        let tx = conn.transaction()?;
        tx.execute("DELETE FROM foods", [])?;
        {
            let mut stmt =
                tx.prepare_cached("INSERT INTO foods (position, record) VALUES (?1, ?2)")?;
            for (position, item) in items.iter().enumerate() {
                stmt.execute(params![position as i64, serde_json::to_string(item)?])?;
            }
        }
        tx.commit()?;

        Ok(count)
    }

    async fn stats(&self) -> StoreResult<StoreStats> {
        let conn = self.lock()?;
        let users: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        let log_entries: i64 =
            conn.query_row("SELECT COUNT(*) FROM health_logs", [], |row| row.get(0))?;
        let corpus_items: i64 =
            conn.query_row("SELECT COUNT(*) FROM foods", [], |row| row.get(0))?;

        Ok(StoreStats {
            users: users as usize,
            log_entries: log_entries as usize,
            corpus_items: corpus_items as usize,
        })
    }
}
