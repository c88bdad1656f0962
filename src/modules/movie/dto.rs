use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;
use validator::Validate;

use super::links::Credit;
use super::model::{CastMember, Movie, MovieDetails};
use crate::common::error::AppResult;
use crate::common::patch::PatchDocument;
use crate::common::upload::{FileUpload, MultipartForm};
use crate::common::validation::validate_with;
use crate::modules::genre::dto::GenreResponse;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActorCreditRequest {
    pub actor_id: i64,
    #[serde(default)]
    pub character: String,
}

impl From<ActorCreditRequest> for Credit {
    fn from(req: ActorCreditRequest) -> Self {
        Self {
            actor_id: req.actor_id,
            character: req.character,
        }
    }
}

/// Multipart fields: `title`, `inCinema`, `releaseDate`, optional `poster`
/// file, and JSON-encoded `genreIds`, `actors` and `cinemaRoomIds`.
#[derive(Debug, Validate)]
pub struct MovieCreateRequest {
    #[validate(length(min = 1, max = 300, message = "Title must be between 1 and 300 characters"))]
    pub title: String,
    pub in_cinema: bool,
    pub release_date: Date,
    pub poster: Option<FileUpload>,
    pub genre_ids: Vec<i64>,
    pub actors: Vec<ActorCreditRequest>,
    pub cinema_room_ids: Vec<i64>,
}

impl MovieCreateRequest {
    pub fn from_form(mut form: MultipartForm) -> AppResult<Self> {
        let mut reader = form.reader();
        let title = reader.string("title");
        let in_cinema = reader.boolean("inCinema");
        let release_date = reader.date("releaseDate");
        let genre_ids = reader.json::<Vec<i64>>("genreIds");
        let actors = reader.json::<Vec<ActorCreditRequest>>("actors");
        let cinema_room_ids = reader.json::<Vec<i64>>("cinemaRoomIds");
        let mut errors = reader.finish();

        let poster = form.take_file("poster");
        if let Some(poster) = &poster {
            errors.extend(poster.check_image("poster"));
        }

        // A missing date is already reported in `errors`, so the placeholder never persists.
        let req = Self {
            title,
            in_cinema,
            release_date: release_date.unwrap_or(Date::MIN),
            poster,
            genre_ids,
            actors,
            cinema_room_ids,
        };
        validate_with(&req, errors)?;
        Ok(req)
    }

    pub fn credits(&self) -> Vec<Credit> {
        self.actors.iter().cloned().map(Credit::from).collect()
    }
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieActorResponse {
    pub actor_id: i64,
    pub name: String,
    pub photo: Option<String>,
    pub character: String,
    pub order: i32,
}

impl From<CastMember> for MovieActorResponse {
    fn from(c: CastMember) -> Self {
        Self {
            actor_id: c.actor_id,
            name: c.name,
            photo: c.photo,
            character: c.character,
            order: c.order,
        }
    }
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub in_cinema: bool,
    #[schema(value_type = String, format = Date)]
    pub release_date: Date,
    pub poster: Option<String>,
    pub genres: Vec<GenreResponse>,
    /// Cast in display order.
    pub actors: Vec<MovieActorResponse>,
    pub cinema_room_ids: Vec<i64>,
}

impl From<MovieDetails> for MovieResponse {
    fn from(d: MovieDetails) -> Self {
        let Movie {
            id,
            title,
            in_cinema,
            release_date,
            poster,
        } = d.movie;

        Self {
            id,
            title,
            in_cinema,
            release_date,
            poster,
            genres: d.genres.into_iter().map(GenreResponse::from).collect(),
            actors: d.cast.into_iter().map(MovieActorResponse::from).collect(),
            cinema_room_ids: d.cinema_room_ids,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoviesShowcaseResponse {
    pub next_premiers: Vec<MovieResponse>,
    pub in_cinema: Vec<MovieResponse>,
}

/// Editable scalar fields. Associations and the poster change through `PUT`.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoviePatch {
    #[validate(length(min = 1, max = 300, message = "Title must be between 1 and 300 characters"))]
    pub title: String,
    pub in_cinema: bool,
    pub release_date: Date,
}

impl PatchDocument<Movie> for MoviePatch {
    fn from_entity(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            in_cinema: movie.in_cinema,
            release_date: movie.release_date,
        }
    }

    fn apply_to(self, movie: &mut Movie) {
        movie.title = self.title;
        movie.in_cinema = self.in_cinema;
        movie.release_date = self.release_date;
    }
}
