//! Pluggable opinion stores.
//!
//! - `MemoryOpinionStore`: in-memory, lost on restart
//! - `SqliteOpinionStore`: `SQLite` table with a unique text column

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::model::{NewOpinion, Opinion};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryOpinionStore;
pub use sqlite::SqliteOpinionStore;

/// Persistence for opinions.
#[async_trait]
pub trait OpinionStore: Send + Sync {
    /// Store a validated opinion stamped with the current time.
    ///
    /// Fails with [`StoreError::Duplicate`](crate::StoreError::Duplicate)
    /// when the text is already present; nothing is written in that case.
    async fn insert(&self, opinion: NewOpinion) -> StoreResult<Opinion>;

    /// Look an opinion up by id.
    async fn get(&self, id: i64) -> StoreResult<Option<Opinion>>;

    /// A uniformly chosen opinion, or `None` when the table is empty.
    async fn random(&self) -> StoreResult<Option<Opinion>>;

    /// Most recent opinions first.
    async fn recent(&self, limit: usize) -> StoreResult<Vec<Opinion>>;

    /// Number of stored opinions.
    async fn count(&self) -> StoreResult<u64>;
}
