use async_trait::async_trait;

use super::model::Review;
use super::repository::ReviewRepository;
use crate::common::pagination::PageWindow;
use crate::infrastructure::db::memory::MemoryStore;
use crate::infrastructure::db::store::{Repository, StoreError};
use crate::modules::movie::model::Movie;

/// Reviews held in memory, with the movie reference and the one-review-per-
/// user rule enforced on insert.
#[derive(Clone)]
pub struct MemoryReviewStore {
    reviews: MemoryStore<Review>,
    movies: MemoryStore<Movie>,
}

impl MemoryReviewStore {
    pub fn new(reviews: MemoryStore<Review>, movies: MemoryStore<Movie>) -> Self {
        Self { reviews, movies }
    }

    async fn for_movie(&self, movie_id: i64) -> Vec<Review> {
        if !self.movies.contains(movie_id).await {
            return Vec::new();
        }
        self.reviews
            .snapshot()
            .await
            .into_iter()
            .filter(|r| r.movie_id == movie_id)
            .collect()
    }
}

#[async_trait]
impl Repository<Review> for MemoryReviewStore {
    async fn count(&self) -> Result<i64, StoreError> {
        self.reviews.count().await
    }

    async fn list(&self, window: Option<PageWindow>) -> Result<Vec<Review>, StoreError> {
        self.reviews.list(window).await
    }

    async fn find(&self, id: i64) -> Result<Option<Review>, StoreError> {
        self.reviews.find(id).await
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        self.reviews.exists(id).await
    }

    async fn insert(&self, review: Review) -> Result<Review, StoreError> {
        if !self.movies.contains(review.movie_id).await {
            return Err(StoreError::ReferentialIntegrity(format!("movie {}", review.movie_id)));
        }

        let (movie_id, user_id) = (review.movie_id, review.user_id.clone());
        self.reviews
            .insert_checked(review, |rows| {
                let taken = rows
                    .values()
                    .any(|r| r.movie_id == movie_id && r.user_id == user_id);
                if taken {
                    Err(StoreError::UniqueViolation("reviews_movie_id_user_id_key".to_string()))
                } else {
                    Ok(())
                }
            })
            .await
    }

    async fn update(&self, review: &Review) -> Result<(), StoreError> {
        self.reviews.update(review).await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.reviews.delete(id).await
    }
}

#[async_trait]
impl ReviewRepository for MemoryReviewStore {
    async fn count_for_movie(&self, movie_id: i64) -> Result<i64, StoreError> {
        Ok(self.for_movie(movie_id).await.len() as i64)
    }

    async fn list_for_movie(
        &self,
        movie_id: i64,
        window: Option<PageWindow>,
    ) -> Result<Vec<Review>, StoreError> {
        let rows = self.for_movie(movie_id).await;
        Ok(match window {
            Some(window) => window.slice(rows),
            None => rows,
        })
    }

    async fn exists_for(&self, movie_id: i64, user_id: &str) -> Result<bool, StoreError> {
        Ok(self
            .for_movie(movie_id)
            .await
            .iter()
            .any(|r| r.user_id == user_id))
    }
}
