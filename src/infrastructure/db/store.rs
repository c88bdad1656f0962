//! Persistence capability consumed by the resource services.

use async_trait::async_trait;

use crate::common::pagination::PageWindow;

/// A stored record with a store-assigned numeric identifier.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Display name used in not-found messages.
    const NAME: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Referenced record does not exist: {0}")]
    ReferentialIntegrity(String),

    #[error("Duplicate record: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let detail = db_err
                .constraint()
                .map(str::to_string)
                .unwrap_or_else(|| db_err.message().to_string());
            if db_err.is_foreign_key_violation() {
                return StoreError::ReferentialIntegrity(detail);
            }
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation(detail);
            }
        }
        StoreError::Database(err)
    }
}

/// Generic collection access for any entity type.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn count(&self) -> Result<i64, StoreError>;

    /// Rows in store order, optionally restricted to one page.
    async fn list(&self, window: Option<PageWindow>) -> Result<Vec<E>, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<E>, StoreError>;

    async fn exists(&self, id: i64) -> Result<bool, StoreError>;

    /// Persists a new row and returns it with the assigned identifier.
    async fn insert(&self, entity: E) -> Result<E, StoreError>;

    /// Overwrites every column of the row identified by `entity.id()`.
    async fn update(&self, entity: &E) -> Result<(), StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
