use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Review {
    pub id: i64,
    pub comment: String,
    /// 1 to 5 inclusive.
    pub rating: i32,
    pub movie_id: i64,
    /// Subject of the author's access token.
    pub user_id: String,
}
