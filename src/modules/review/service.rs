use super::dto::{ReviewCreateRequest, ReviewResponse};
use super::model::Review;
use crate::common::error::{AppError, AppResult};
use crate::common::pagination::{Paged, PaginationQuery};
use crate::common::resource::{Created, Crud, Readable, Resource};
use crate::common::validation::validate;
use crate::modules::movie::service::MovieResource;
use crate::state::AppState;

pub struct ReviewResource;

impl Resource for ReviewResource {
    type Entity = Review;
}

impl Readable for ReviewResource {
    type Read = ReviewResponse;
}

type Reviews = Crud<ReviewResource>;

pub struct ReviewService;

impl ReviewService {
    pub async fn find_page(
        state: &AppState,
        movie_id: i64,
        query: PaginationQuery,
    ) -> AppResult<Paged<ReviewResponse>> {
        ensure_movie(state, movie_id).await?;

        let query = query.normalized();
        let count = state.reviews.count_for_movie(movie_id).await?;
        let rows = state.reviews.list_for_movie(movie_id, query.window()).await?;

        Ok(Paged {
            items: rows.into_iter().map(ReviewResponse::from).collect(),
            total_pages: query.total_pages(count),
        })
    }

    pub async fn create(
        state: &AppState,
        movie_id: i64,
        user_id: &str,
        req: ReviewCreateRequest,
    ) -> AppResult<Created<ReviewResponse>> {
        ensure_movie(state, movie_id).await?;
        validate(&req)?;

        if state.reviews.exists_for(movie_id, user_id).await? {
            return Err(AppError::Conflict(
                "You already have a review for this movie".to_string(),
            ));
        }

        let stored = state
            .reviews
            .insert(Review {
                id: 0,
                comment: req.comment,
                rating: req.rating,
                movie_id,
                user_id: user_id.to_string(),
            })
            .await?;

        Ok(Created {
            id: stored.id,
            resource: stored.into(),
        })
    }

    pub async fn update(
        state: &AppState,
        movie_id: i64,
        review_id: i64,
        user_id: &str,
        req: ReviewCreateRequest,
    ) -> AppResult<()> {
        ensure_movie(state, movie_id).await?;
        validate(&req)?;

        let mut review = owned_review(state, movie_id, review_id, user_id).await?;
        review.comment = req.comment;
        review.rating = req.rating;
        state.reviews.update(&review).await?;
        Ok(())
    }

    pub async fn delete(state: &AppState, movie_id: i64, review_id: i64, user_id: &str) -> AppResult<()> {
        ensure_movie(state, movie_id).await?;

        owned_review(state, movie_id, review_id, user_id).await?;
        state.reviews.delete(review_id).await?;
        Ok(())
    }
}

async fn ensure_movie(state: &AppState, movie_id: i64) -> AppResult<()> {
    Crud::<MovieResource>::ensure_exists(state.movies.as_ref(), movie_id).await
}

/// Loads a review of `movie_id` that `user_id` wrote.
async fn owned_review(state: &AppState, movie_id: i64, review_id: i64, user_id: &str) -> AppResult<Review> {
    let review = Reviews::load(state.reviews.as_ref(), review_id).await?;
    if review.movie_id != movie_id {
        return Err(AppError::not_found("Review", review_id));
    }
    if review.user_id != user_id {
        return Err(AppError::Forbidden(
            "Only the author can change this review".to_string(),
        ));
    }
    Ok(review)
}
