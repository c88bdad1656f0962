use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::review::model::Review;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReviewCreateRequest {
    #[serde(default)]
    pub comment: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub id: i64,
    pub comment: String,
    pub rating: i32,
    pub movie_id: i64,
    pub user_id: String,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            comment: r.comment,
            rating: r.rating,
            movie_id: r.movie_id,
            user_id: r.user_id,
        }
    }
}
