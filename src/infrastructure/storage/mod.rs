//! File storage capability used for actor photos and movie posters.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

pub mod memory;
pub mod s3;

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores `content` under `container` and returns a public reference to it.
    async fn save(
        &self,
        content: Bytes,
        extension: &str,
        container: &str,
        content_type: &str,
    ) -> Result<String>;

    async fn delete(&self, reference: &str, container: &str) -> Result<()>;

    /// Replaces the file behind `current` (if any) with `content`. The new
    /// file is stored before the old one is removed.
    async fn update(
        &self,
        content: Bytes,
        extension: &str,
        container: &str,
        current: Option<&str>,
        content_type: &str,
    ) -> Result<String> {
        let reference = self.save(content, extension, container, content_type).await?;
        if let Some(current) = current {
            self.delete(current, container).await?;
        }
        Ok(reference)
    }
}

/// Last path segment of a stored reference, i.e. the generated file name.
pub fn file_name_of(reference: &str) -> &str {
    let path = reference.split(['?', '#']).next().unwrap_or(reference);
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::file_name_of;

    #[test]
    fn file_name_ignores_host_and_query() {
        assert_eq!(file_name_of("http://cdn/actors/abc.jpg?v=2"), "abc.jpg");
        assert_eq!(file_name_of("abc.png"), "abc.png");
    }
}
