use async_trait::async_trait;
use sqlx::query_builder::Separated;
use sqlx::{Postgres, QueryBuilder};

use super::model::Review;
use crate::common::pagination::PageWindow;
use crate::infrastructure::db::postgres::{push_window, PgStore, PgTable};
use crate::infrastructure::db::store::{Entity, Repository, StoreError};

impl Entity for Review {
    const NAME: &'static str = "Review";

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

impl PgTable for Review {
    const TABLE: &'static str = "reviews";
    const COLUMNS: &'static [&'static str] = &["comment", "rating", "movie_id", "user_id"];

    fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>) {
        values.push_bind(self.comment.clone());
        values.push_bind(self.rating);
        values.push_bind(self.movie_id);
        values.push_bind(self.user_id.clone());
    }
}

/// Reviews scoped to one movie. Inserting a second review for the same
/// (movie, user) pair fails with `StoreError::UniqueViolation`.
#[async_trait]
pub trait ReviewRepository: Repository<Review> {
    async fn count_for_movie(&self, movie_id: i64) -> Result<i64, StoreError>;

    async fn list_for_movie(
        &self,
        movie_id: i64,
        window: Option<PageWindow>,
    ) -> Result<Vec<Review>, StoreError>;

    async fn exists_for(&self, movie_id: i64, user_id: &str) -> Result<bool, StoreError>;
}

#[async_trait]
impl ReviewRepository for PgStore {
    async fn count_for_movie(&self, movie_id: i64) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews WHERE movie_id = $1")
            .bind(movie_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn list_for_movie(
        &self,
        movie_id: i64,
        window: Option<PageWindow>,
    ) -> Result<Vec<Review>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM reviews WHERE movie_id = ");
        qb.push_bind(movie_id).push(" ORDER BY id");
        push_window(&mut qb, window);

        let rows = qb.build_query_as::<Review>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn exists_for(&self, movie_id: i64, user_id: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE movie_id = $1 AND user_id = $2)",
        )
        .bind(movie_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
