use time::{Date, OffsetDateTime};
use tracing::warn;

use super::dto::{MovieCreateRequest, MoviePatch, MovieResponse, MoviesShowcaseResponse};
use super::model::{Movie, MovieLinks};
use super::query::{MovieQuery, MoviesFilter};
use crate::common::error::{AppError, AppResult};
use crate::common::pagination::{total_pages, Paged, PaginationQuery};
use crate::common::patch::PatchOperation;
use crate::common::resource::{Created, Crud, Patchable, Resource};
use crate::common::upload::FileUpload;
use crate::state::AppState;

/// Storage container for movie posters.
pub const POSTER_CONTAINER: &str = "movies";

/// Size of each showcase list.
pub const SHOWCASE_SIZE: i64 = 20;

pub struct MovieResource;

impl Resource for MovieResource {
    type Entity = Movie;
}

impl Patchable for MovieResource {
    type Patch = MoviePatch;
}

type Movies = Crud<MovieResource>;

/// Result of a filter request. `total_pages` is only set when paging applied.
#[derive(Debug)]
pub struct FilteredMovies {
    pub items: Vec<MovieResponse>,
    pub total_pages: Option<i64>,
}

pub struct MovieService;

impl MovieService {
    pub async fn find_page(state: &AppState, pagination: PaginationQuery) -> AppResult<Paged<MovieResponse>> {
        let pagination = pagination.normalized();
        let found = state.movies.search(&MovieQuery::page(pagination)).await?;

        Ok(Paged {
            items: found.items.into_iter().map(MovieResponse::from).collect(),
            total_pages: pagination.total_pages(found.total),
        })
    }

    pub async fn filter(state: &AppState, filter: &MoviesFilter) -> AppResult<FilteredMovies> {
        Self::filter_on(state, filter, today()).await
    }

    pub async fn filter_on(state: &AppState, filter: &MoviesFilter, today: Date) -> AppResult<FilteredMovies> {
        let query = MovieQuery::compose(filter, today);
        let found = state.movies.search(&query).await?;

        Ok(FilteredMovies {
            items: found.items.into_iter().map(MovieResponse::from).collect(),
            total_pages: query.window.map(|w| total_pages(found.total, w.limit)),
        })
    }

    pub async fn showcase(state: &AppState) -> AppResult<MoviesShowcaseResponse> {
        let today = today();
        let next_premiers = state
            .movies
            .search(&MovieQuery::premiering_after(today, SHOWCASE_SIZE))
            .await?;
        let in_cinema = state.movies.search(&MovieQuery::showing(SHOWCASE_SIZE)).await?;

        Ok(MoviesShowcaseResponse {
            next_premiers: next_premiers.items.into_iter().map(MovieResponse::from).collect(),
            in_cinema: in_cinema.items.into_iter().map(MovieResponse::from).collect(),
        })
    }

    pub async fn find_by_id(state: &AppState, id: i64) -> AppResult<MovieResponse> {
        state
            .movies
            .find_details(id)
            .await?
            .map(MovieResponse::from)
            .ok_or_else(|| AppError::not_found("Movie", id))
    }

    pub async fn create(state: &AppState, req: MovieCreateRequest) -> AppResult<Created<MovieResponse>> {
        let links = MovieLinks::build(0, &req.genre_ids, &req.credits(), &req.cinema_room_ids)
            .map_err(AppError::Validation)?;

        let poster = match &req.poster {
            Some(upload) => Some(save_poster(state, upload).await?),
            None => None,
        };

        let movie = Movie {
            id: 0,
            title: req.title,
            in_cinema: req.in_cinema,
            release_date: req.release_date,
            poster,
        };

        let stored = match state.movies.create_with_links(movie.clone(), links).await {
            Ok(stored) => stored,
            Err(e) => {
                discard_poster(state, movie.poster.as_deref()).await;
                return Err(e.into());
            }
        };

        let resource = Self::find_by_id(state, stored.id).await?;
        Ok(Created {
            id: stored.id,
            resource,
        })
    }

    /// Replaces scalars and every association. The poster is swapped only
    /// when a new one is uploaded; the previous file is removed once the
    /// write commits.
    pub async fn update(state: &AppState, id: i64, req: MovieCreateRequest) -> AppResult<()> {
        let mut movie = Movies::load(state.movies.as_ref(), id).await?;
        let links = MovieLinks::build(id, &req.genre_ids, &req.credits(), &req.cinema_room_ids)
            .map_err(AppError::Validation)?;
        let previous_poster = movie.poster.clone();

        let new_poster = match &req.poster {
            Some(upload) => Some(save_poster(state, upload).await?),
            None => None,
        };
        if new_poster.is_some() {
            movie.poster = new_poster.clone();
        }
        movie.title = req.title;
        movie.in_cinema = req.in_cinema;
        movie.release_date = req.release_date;

        if let Err(e) = state.movies.replace_with_links(&movie, links).await {
            discard_poster(state, new_poster.as_deref()).await;
            return Err(e.into());
        }
        if new_poster.is_some() {
            discard_poster(state, previous_poster.as_deref()).await;
        }
        Ok(())
    }

    pub async fn patch(state: &AppState, id: i64, ops: &[PatchOperation]) -> AppResult<()> {
        Movies::patch(state.movies.as_ref(), id, ops).await
    }

    pub async fn delete(state: &AppState, id: i64) -> AppResult<()> {
        let movie = Movies::load(state.movies.as_ref(), id).await?;
        state.movies.delete(id).await?;
        discard_poster(state, movie.poster.as_deref()).await;
        Ok(())
    }
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

async fn save_poster(state: &AppState, upload: &FileUpload) -> AppResult<String> {
    let reference = state
        .storage
        .save(
            upload.content.clone(),
            &upload.extension(),
            POSTER_CONTAINER,
            &upload.content_type,
        )
        .await?;
    Ok(reference)
}

async fn discard_poster(state: &AppState, poster: Option<&str>) {
    if let Some(poster) = poster {
        if let Err(e) = state.storage.delete(poster, POSTER_CONTAINER).await {
            warn!(error = %e, poster, "Failed to remove movie poster");
        }
    }
}
