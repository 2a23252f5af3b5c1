use std::collections::BTreeMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::store::{Record, RecordStore};

struct Table<T: Record> {
    rows: BTreeMap<T::Key, T>,
    next_id: i64,
}

/// In-process store backed by an ordered map. Generated ids start at 1.
pub struct MemoryStore<T: Record> {
    table: RwLock<Table<T>>,
}

impl<T: Record> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<T: Record> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn column_matches(row: &Value, column: &str, value: &str) -> bool {
    match row.get(column) {
        Some(Value::String(s)) => s == value,
        Some(Value::Null) | None => false,
        Some(other) => other.to_string() == value,
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for MemoryStore<T> {
    async fn find_by_id(&self, key: &T::Key) -> Result<Option<T>> {
        let table = self.table.read().await;
        Ok(table.rows.get(key).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by(&self, column: &str, value: &str) -> Result<Vec<T>> {
        let table = self.table.read().await;
        let mut matches = Vec::new();

        for record in table.rows.values() {
            let row = serde_json::to_value(record)?;
            if column_matches(&row, column, value) {
                matches.push(record.clone());
            }
        }

        Ok(matches)
    }

    async fn save(&self, mut record: T) -> Result<T> {
        let mut table = self.table.write().await;

        if record.key().is_none() {
            let id = table.next_id;
            table.next_id += 1;
            record.assign_id(id);
        }

        let key = record
            .key()
            .ok_or_else(|| anyhow!("{} record has no key after save", T::TABLE))?;

        debug!("Saving {} record {}", T::TABLE, key);
        table.rows.insert(key, record.clone());

        Ok(record)
    }

    async fn delete(&self, key: &T::Key) -> Result<bool> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(key).is_some())
    }

    async fn delete_all(&self) -> Result<()> {
        let mut table = self.table.write().await;
        table.rows.clear();
        Ok(())
    }
}
