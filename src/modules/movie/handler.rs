use super::dto::{MovieCreateRequest, MovieResponse, MoviesShowcaseResponse};
use super::query::MoviesFilter;
use super::service::MovieService;
use crate::common::error::AppError;
use crate::common::extract::{Json, Path, Query};
use crate::common::pagination::PaginationQuery;
use crate::common::patch::PatchOperation;
use crate::common::response::{ApiCreated, ApiPaged, ApiResponse, ApiSuccess};
use crate::common::upload::MultipartForm;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// List movies with their genres and cast
#[utoipa::path(
    get,
    path = "/api/v1/movies",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of movies; page count in the totalpages header", body = ApiResponse<Vec<MovieResponse>>)
    ),
    tag = "Movies"
)]
pub async fn list_movies(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = MovieService::find_page(&state, query).await?;
    Ok(ApiPaged(
        ApiResponse::success(page.items, "Movies retrieved successfully"),
        page.total_pages,
    ))
}

/// Upcoming premieres and movies in cinemas, 20 of each
#[utoipa::path(
    get,
    path = "/api/v1/movies/showcase",
    responses(
        (status = 200, description = "Showcase lists", body = ApiResponse<MoviesShowcaseResponse>)
    ),
    tag = "Movies"
)]
pub async fn showcase(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let showcase = MovieService::showcase(&state).await?;
    Ok(ApiSuccess(
        ApiResponse::success(showcase, "Showcase retrieved successfully"),
        StatusCode::OK,
    ))
}

/// Filter, order and page movies
/// The totalpages header is present only when the request is paginated
#[utoipa::path(
    get,
    path = "/api/v1/movies/filter",
    params(MoviesFilter),
    responses(
        (status = 200, description = "Matching movies", body = ApiResponse<Vec<MovieResponse>>)
    ),
    tag = "Movies"
)]
pub async fn filter_movies(
    State(state): State<AppState>,
    Query(filter): Query<MoviesFilter>,
) -> Result<Response, AppError> {
    let found = MovieService::filter(&state, &filter).await?;
    let body = ApiResponse::success(found.items, "Movies retrieved successfully");

    Ok(match found.total_pages {
        Some(total_pages) => ApiPaged(body, total_pages).into_response(),
        None => ApiSuccess(body, StatusCode::OK).into_response(),
    })
}

/// Get movie by ID
#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie details", body = ApiResponse<MovieResponse>),
        (status = 404, description = "Movie not found")
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let movie = MovieService::find_by_id(&state, id).await?;
    Ok(ApiSuccess(
        ApiResponse::success(movie, "Movie retrieved successfully"),
        StatusCode::OK,
    ))
}

/// Create movie
/// Multipart form: `title`, `inCinema`, `releaseDate`, optional `poster`,
/// and JSON-encoded `genreIds`, `actors`, `cinemaRoomIds`
#[utoipa::path(
    post,
    path = "/api/v1/movies",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Movie created", body = ApiResponse<MovieResponse>),
        (status = 400, description = "Validation failed")
    ),
    tag = "Movies"
)]
pub async fn create_movie(
    State(state): State<AppState>,
    form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let req = MovieCreateRequest::from_form(form)?;

    let created = MovieService::create(&state, req).await?;
    Ok(ApiCreated(
        ApiResponse::success(created.resource, "Movie created successfully"),
        format!("/api/v1/movies/{}", created.id),
    ))
}

/// Replace movie and its associations
#[utoipa::path(
    put,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 204, description = "Movie updated"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Movie not found")
    ),
    tag = "Movies"
)]
pub async fn update_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let req = MovieCreateRequest::from_form(form)?;

    MovieService::update(&state, id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Partially update movie
#[utoipa::path(
    patch,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    request_body = Vec<PatchOperation>,
    responses(
        (status = 204, description = "Movie patched"),
        (status = 400, description = "Patched movie is invalid"),
        (status = 404, description = "Movie not found")
    ),
    tag = "Movies"
)]
pub async fn patch_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(ops): Json<Vec<PatchOperation>>,
) -> Result<impl IntoResponse, AppError> {
    MovieService::patch(&state, id, &ops).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete movie
#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 404, description = "Movie not found")
    ),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    MovieService::delete(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
