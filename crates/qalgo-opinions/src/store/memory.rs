//! In-memory opinion store (no persistence).

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tokio::sync::RwLock;

use super::OpinionStore;
use crate::error::{StoreError, StoreResult};
use crate::model::{NewOpinion, Opinion};

#[derive(Debug, Default)]
struct Rows {
    next_id: i64,
    by_id: BTreeMap<i64, Opinion>,
}

/// In-memory store with the same uniqueness rule as the SQLite table.
#[derive(Debug, Clone, Default)]
pub struct MemoryOpinionStore {
    rows: Arc<RwLock<Rows>>,
}

impl MemoryOpinionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OpinionStore for MemoryOpinionStore {
    async fn insert(&self, opinion: NewOpinion) -> StoreResult<Opinion> {
        let mut rows = self.rows.write().await;
        if rows.by_id.values().any(|o| o.text == opinion.text) {
            return Err(StoreError::Duplicate(opinion.title));
        }
        rows.next_id += 1;
        let id = rows.next_id;
        let stored = opinion.into_opinion(id, Utc::now());
        rows.by_id.insert(id, stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Opinion>> {
        Ok(self.rows.read().await.by_id.get(&id).cloned())
    }

    async fn random(&self) -> StoreResult<Option<Opinion>> {
        let rows = self.rows.read().await;
        if rows.by_id.is_empty() {
            return Ok(None);
        }
        let offset = rand::thread_rng().gen_range(0..rows.by_id.len());
        Ok(rows.by_id.values().nth(offset).cloned())
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<Opinion>> {
        let rows = self.rows.read().await;
        Ok(rows.by_id.values().rev().take(limit).cloned().collect())
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.rows.read().await.by_id.len() as u64)
    }
}
