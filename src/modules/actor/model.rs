use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub date_of_birth: Date,
    /// Public reference of the stored photo.
    pub photo: Option<String>,
}
