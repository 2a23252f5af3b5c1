use std::fmt;
use std::hash::Hash;

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

/// A row type that can live in a [`RecordStore`].
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    type Key: Clone + Eq + Ord + Hash + fmt::Display + Send + Sync + 'static;

    /// Table name used by the PostgREST backend.
    const TABLE: &'static str;

    /// Column holding the primary key.
    const KEY_COLUMN: &'static str;

    /// The primary key, or `None` for a record the store has not saved yet.
    fn key(&self) -> Option<Self::Key>;

    /// Stamp a store-generated identifier. Records keyed by a natural
    /// key leave this as a no-op.
    fn assign_id(&mut self, _id: i64) {}
}

/// Plain record storage: lookups, upsert and delete. No invariants beyond
/// key uniqueness live here.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    async fn find_by_id(&self, key: &T::Key) -> Result<Option<T>>;

    async fn find_all(&self) -> Result<Vec<T>>;

    /// All records whose `column` equals `value`.
    async fn find_by(&self, column: &str, value: &str) -> Result<Vec<T>>;

    /// Insert or replace. Returns the stored record with its key populated.
    async fn save(&self, record: T) -> Result<T>;

    /// Returns `false` when nothing was stored under `key`.
    async fn delete(&self, key: &T::Key) -> Result<bool>;

    async fn delete_all(&self) -> Result<()>;
}
