//! SQLite opinion store.
//!
//! One connection behind a mutex; every call runs on tokio's blocking pool
//! and every write in its own transaction.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tokio::task;
use tracing::{debug, warn};

use super::OpinionStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{NewOpinion, Opinion};

const COLUMNS: &str = "id, title, text, source, timestamp";

/// SQLite-backed store.
#[derive(Clone)]
pub struct SqliteOpinionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteOpinionStore {
    /// Open (or create) the database file and apply the schema.
    ///
    /// Blocks on the connection mutex; call it outside the async executor.
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// Private in-memory database.
    pub fn in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        init_schema(&conn)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_connection<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = self.connection.clone();
        task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|_| StoreError::Internal("database lock poisoned".into()))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Internal(format!("task join error: {e}")))?
    }
}

fn init_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS opinions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            text TEXT NOT NULL UNIQUE,
            source TEXT,
            timestamp TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_opinions_timestamp ON opinions(timestamp);",
    )?;
    Ok(())
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<Opinion> {
    let raw: String = row.get(4)?;
    let timestamp = DateTime::parse_from_rfc3339(&raw)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);
    Ok(Opinion {
        id: row.get(0)?,
        title: row.get(1)?,
        text: row.get(2)?,
        source: row.get(3)?,
        timestamp,
    })
}

fn count_rows(conn: &Connection) -> StoreResult<u64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM opinions", [], |row| row.get(0))?;
    u64::try_from(count).map_err(|_| StoreError::Corrupt(format!("negative row count {count}")))
}

#[async_trait]
impl OpinionStore for SqliteOpinionStore {
    async fn insert(&self, opinion: NewOpinion) -> StoreResult<Opinion> {
        self.with_connection(move |conn| {
            let timestamp = Utc::now();
            let tx = conn.transaction()?;
            let inserted = tx.execute(
                "INSERT INTO opinions (title, text, source, timestamp) VALUES (?1, ?2, ?3, ?4)",
                params![
                    opinion.title,
                    opinion.text,
                    opinion.source,
                    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
                ],
            );
            match inserted {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    tx.rollback()?;
                    warn!("Rejected duplicate opinion text");
                    return Err(StoreError::Duplicate(opinion.title));
                }
                Err(e) => {
                    tx.rollback()?;
                    return Err(e.into());
                }
            }
            let id = tx.last_insert_rowid();
            tx.commit()?;
            debug!(id, "Stored opinion");
            Ok(opinion.into_opinion(id, timestamp))
        })
        .await
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Opinion>> {
        self.with_connection(move |conn| {
            let opinion = conn
                .query_row(
                    &format!("SELECT {COLUMNS} FROM opinions WHERE id = ?1"),
                    params![id],
                    from_row,
                )
                .optional()?;
            Ok(opinion)
        })
        .await
    }

    async fn random(&self) -> StoreResult<Option<Opinion>> {
        self.with_connection(|conn| {
            let count = count_rows(conn)?;
            if count == 0 {
                return Ok(None);
            }
            let offset = rand::thread_rng().gen_range(0..count);
            let opinion = conn
                .query_row(
                    &format!("SELECT {COLUMNS} FROM opinions ORDER BY id LIMIT 1 OFFSET ?1"),
                    params![offset as i64],
                    from_row,
                )
                .optional()?;
            Ok(opinion)
        })
        .await
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<Opinion>> {
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM opinions ORDER BY timestamp DESC, id DESC LIMIT ?1"
            ))?;
            let rows = stmt.query_map(params![limit as i64], from_row)?;
            Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
        })
        .await
    }

    async fn count(&self) -> StoreResult<u64> {
        self.with_connection(|conn| count_rows(conn)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OpinionForm;

    fn new_opinion(title: &str, text: &str) -> NewOpinion {
        OpinionForm {
            title: title.into(),
            text: text.into(),
            source: None,
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let store = SqliteOpinionStore::in_memory().unwrap();
        let stored = store.insert(new_opinion("Simon", "Exponential")).await.unwrap();
        assert_eq!(stored.id, 1);
        let loaded = store.get(stored.id).await.unwrap().unwrap();
        assert_eq!(loaded, stored);
        assert!(store.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_text_rolls_back() {
        let store = SqliteOpinionStore::in_memory().unwrap();
        store.insert(new_opinion("a", "same")).await.unwrap();
        let err = store.insert(new_opinion("b", "same")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_random_on_empty_table() {
        let store = SqliteOpinionStore::in_memory().unwrap();
        assert!(store.random().await.unwrap().is_none());
        store.insert(new_opinion("only", "one")).await.unwrap();
        assert_eq!(store.random().await.unwrap().unwrap().title, "only");
    }
}
