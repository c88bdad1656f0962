//! In-process store with the same observable behavior as `PgStore`:
//! ascending ids, store order by id, whole-row updates.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::common::pagination::PageWindow;
use crate::infrastructure::db::store::{Entity, Repository, StoreError};

pub struct MemoryStore<E> {
    rows: Arc<RwLock<BTreeMap<i64, E>>>,
    sequence: Arc<AtomicI64>,
}

impl<E> Clone for MemoryStore<E> {
    fn clone(&self) -> Self {
        Self {
            rows: Arc::clone(&self.rows),
            sequence: Arc::clone(&self.sequence),
        }
    }
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            rows: Arc::new(RwLock::new(BTreeMap::new())),
            sequence: Arc::new(AtomicI64::new(0)),
        }
    }
}

impl<E: Entity> MemoryStore<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every row in id order.
    pub async fn snapshot(&self) -> Vec<E> {
        self.rows.read().await.values().cloned().collect()
    }

    pub async fn contains(&self, id: i64) -> bool {
        self.rows.read().await.contains_key(&id)
    }

    /// Inserts after `check` accepts the current rows, under one write lock.
    pub async fn insert_checked<F>(&self, mut entity: E, check: F) -> Result<E, StoreError>
    where
        F: FnOnce(&BTreeMap<i64, E>) -> Result<(), StoreError>,
    {
        let mut rows = self.rows.write().await;
        check(&*rows)?;
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        entity.set_id(id);
        rows.insert(id, entity.clone());
        Ok(entity)
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryStore<E> {
    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.rows.read().await.len() as i64)
    }

    async fn list(&self, window: Option<PageWindow>) -> Result<Vec<E>, StoreError> {
        let rows = self.snapshot().await;
        Ok(match window {
            Some(window) => window.slice(rows),
            None => rows,
        })
    }

    async fn find(&self, id: i64) -> Result<Option<E>, StoreError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.contains(id).await)
    }

    async fn insert(&self, entity: E) -> Result<E, StoreError> {
        self.insert_checked(entity, |_| Ok(())).await
    }

    async fn update(&self, entity: &E) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        if let Some(row) = rows.get_mut(&entity.id()) {
            *row = entity.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.rows.write().await.remove(&id);
        Ok(())
    }
}
