use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{file_name_of, FileStorage};

/// Keeps files in a map keyed by `container/file`. References look like
/// `memory://container/file`.
#[derive(Clone, Default)]
pub struct MemoryFileStorage {
    files: Arc<RwLock<HashMap<String, StoredFile>>>,
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub content: Bytes,
    pub content_type: String,
}

impl MemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, reference: &str) -> Option<StoredFile> {
        let key = reference.trim_start_matches("memory://");
        self.files.read().await.get(key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl FileStorage for MemoryFileStorage {
    async fn save(
        &self,
        content: Bytes,
        extension: &str,
        container: &str,
        content_type: &str,
    ) -> Result<String> {
        let key = format!("{container}/{}{extension}", Uuid::new_v4());
        let file = StoredFile {
            content,
            content_type: content_type.to_string(),
        };
        self.files.write().await.insert(key.clone(), file);
        Ok(format!("memory://{key}"))
    }

    async fn delete(&self, reference: &str, container: &str) -> Result<()> {
        let key = format!("{container}/{}", file_name_of(reference));
        self.files.write().await.remove(&key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn update_replaces_previous_file() {
        let storage = MemoryFileStorage::new();
        let first = storage
            .save(Bytes::from_static(b"one"), ".png", "actors", "image/png")
            .await
            .unwrap();
        let second = storage
            .update(Bytes::from_static(b"two"), ".png", "actors", Some(&first), "image/png")
            .await
            .unwrap();

        assert!(storage.get(&first).await.is_none());
        assert_eq!(storage.get(&second).await.unwrap().content, Bytes::from_static(b"two"));
        assert_eq!(storage.len().await, 1);
    }
}
