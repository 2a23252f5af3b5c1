// libs/appointment-cell/src/services/locks.rs
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::debug;

/// Per-resource async locks that serialize the read-check-write sequence of a
/// booking. Locks live in this process only; several API instances sharing a
/// database need a database-side guard as well.
#[derive(Default)]
pub struct SchedulingLocks {
    locks: Arc<Mutex<LockTable>>,
}

type LockTable = HashMap<String, Arc<AsyncMutex<()>>>;

fn lock_table(table: &Mutex<LockTable>) -> MutexGuard<'_, LockTable> {
    table.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Holds every lock taken by [`SchedulingLocks::acquire`] until dropped.
pub struct SchedulingGuard {
    keys: Vec<String>,
    guards: Vec<OwnedMutexGuard<()>>,
    table: Arc<Mutex<LockTable>>,
}

impl SchedulingGuard {
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

impl Drop for SchedulingGuard {
    // An entry only the table references has no holder and no waiter.
    fn drop(&mut self) {
        self.guards.clear();

        let mut table = lock_table(&self.table);
        for key in &self.keys {
            if table.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
                table.remove(key);
            }
        }
    }
}

impl SchedulingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn doctor_key(doctor_id: i64) -> String {
        format!("doctor:{}", doctor_id)
    }

    pub fn room_key(room_name: &str) -> String {
        format!("room:{}", room_name)
    }

    fn lock_for(&self, key: &str) -> Arc<AsyncMutex<()>> {
        lock_table(&self.locks)
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Takes the locks for `keys` in sorted order, so two bookings that touch
    /// the same pair of resources cannot deadlock.
    pub async fn acquire(&self, mut keys: Vec<String>) -> SchedulingGuard {
        keys.sort();
        keys.dedup();

        let mut guards = Vec::with_capacity(keys.len());
        for key in &keys {
            let lock = self.lock_for(key);
            guards.push(lock.lock_owned().await);
        }

        debug!("Acquired scheduling locks {:?}", keys);

        SchedulingGuard {
            keys,
            guards,
            table: self.locks.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_keys_are_sorted_and_deduplicated() {
        let locks = SchedulingLocks::new();
        let guard = locks
            .acquire(vec![
                SchedulingLocks::room_key("Room101"),
                SchedulingLocks::doctor_key(7),
                SchedulingLocks::doctor_key(7),
            ])
            .await;

        assert_eq!(guard.keys(), &["doctor:7".to_string(), "room:Room101".to_string()]);
    }

    #[tokio::test]
    async fn test_second_holder_waits_for_release() {
        let locks = Arc::new(SchedulingLocks::new());
        let guard = locks.acquire(vec![SchedulingLocks::room_key("Room101")]).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                locks.acquire(vec![SchedulingLocks::room_key("Room101")]).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender should acquire after release")
            .unwrap();
    }

    #[tokio::test]
    async fn test_released_keys_are_pruned() {
        let locks = SchedulingLocks::new();
        let guard = locks
            .acquire(vec![SchedulingLocks::doctor_key(1), SchedulingLocks::room_key("Room101")])
            .await;
        assert_eq!(lock_table(&locks.locks).len(), 2);

        drop(guard);
        assert!(lock_table(&locks.locks).is_empty());
    }

    #[tokio::test]
    async fn test_key_with_waiter_survives_release() {
        let locks = Arc::new(SchedulingLocks::new());
        let guard = locks.acquire(vec![SchedulingLocks::room_key("Room101")]).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _held = locks.acquire(vec![SchedulingLocks::room_key("Room101")]).await;
                tokio::time::sleep(Duration::from_millis(20)).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(guard);
        assert!(lock_table(&locks.locks).contains_key("room:Room101"));

        waiter.await.unwrap();
        assert!(lock_table(&locks.locks).is_empty());
    }

    #[tokio::test]
    async fn test_disjoint_keys_do_not_block() {
        let locks = SchedulingLocks::new();
        let _doctor = locks.acquire(vec![SchedulingLocks::doctor_key(1)]).await;

        let other = tokio::time::timeout(
            Duration::from_millis(100),
            locks.acquire(vec![SchedulingLocks::doctor_key(2)]),
        )
        .await;

        assert!(other.is_ok());
    }
}
