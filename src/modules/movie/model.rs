use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::Date;

use crate::modules::genre::model::Genre;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub in_cinema: bool,
    pub release_date: Date,
    /// Public reference of the stored poster.
    pub poster: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct MovieGenre {
    pub movie_id: i64,
    pub genre_id: i64,
}

/// One credited role. `order` is the 0-based position in the submitted cast.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct MovieActor {
    pub movie_id: i64,
    pub actor_id: i64,
    pub character: String,
    #[sqlx(rename = "actor_order")]
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct MovieCinemaRoom {
    pub movie_id: i64,
    pub cinema_room_id: i64,
}

/// Every join record of one movie. Written wholesale, never merged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieLinks {
    pub genres: Vec<MovieGenre>,
    pub actors: Vec<MovieActor>,
    pub cinema_rooms: Vec<MovieCinemaRoom>,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct CastMember {
    pub actor_id: i64,
    pub name: String,
    pub photo: Option<String>,
    pub character: String,
    #[sqlx(rename = "actor_order")]
    pub order: i32,
}

/// A movie with its associations resolved, cast in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub movie: Movie,
    pub genres: Vec<Genre>,
    pub cast: Vec<CastMember>,
    pub cinema_room_ids: Vec<i64>,
}
