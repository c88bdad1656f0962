use super::dto::{GenreCreateRequest, GenreResponse};
use super::service::GenreService;
use crate::common::error::AppError;
use crate::common::extract::{Json, Path};
use crate::common::patch::PatchOperation;
use crate::common::response::{ApiCreated, ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

/// List all genres
#[utoipa::path(
    get,
    path = "/api/v1/genres",
    responses(
        (status = 200, description = "List of genres", body = ApiResponse<Vec<GenreResponse>>)
    ),
    tag = "Genres"
)]
pub async fn list_genres(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let genres = GenreService::find_all(&state).await?;
    Ok(ApiSuccess(
        ApiResponse::success(genres, "Genres retrieved successfully"),
        StatusCode::OK,
    ))
}

/// Get genre by ID
#[utoipa::path(
    get,
    path = "/api/v1/genres/{id}",
    params(
        ("id" = i64, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre details", body = ApiResponse<GenreResponse>),
        (status = 404, description = "Genre not found")
    ),
    tag = "Genres"
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let genre = GenreService::find_by_id(&state, id).await?;
    Ok(ApiSuccess(
        ApiResponse::success(genre, "Genre retrieved successfully"),
        StatusCode::OK,
    ))
}

/// Create a new genre
#[utoipa::path(
    post,
    path = "/api/v1/genres",
    request_body = GenreCreateRequest,
    responses(
        (status = 201, description = "Genre created", body = ApiResponse<GenreResponse>),
        (status = 400, description = "Validation failed")
    ),
    tag = "Genres"
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Json(payload): Json<GenreCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = GenreService::create(&state, payload).await?;
    Ok(ApiCreated(
        ApiResponse::success(created.resource, "Genre created successfully"),
        format!("/api/v1/genres/{}", created.id),
    ))
}

/// Replace genre
#[utoipa::path(
    put,
    path = "/api/v1/genres/{id}",
    params(
        ("id" = i64, Path, description = "Genre ID")
    ),
    request_body = GenreCreateRequest,
    responses(
        (status = 204, description = "Genre updated"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Genre not found")
    ),
    tag = "Genres"
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<GenreCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    GenreService::update(&state, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Partially update genre
#[utoipa::path(
    patch,
    path = "/api/v1/genres/{id}",
    params(
        ("id" = i64, Path, description = "Genre ID")
    ),
    request_body = Vec<PatchOperation>,
    responses(
        (status = 204, description = "Genre patched"),
        (status = 400, description = "Patched genre is invalid"),
        (status = 404, description = "Genre not found")
    ),
    tag = "Genres"
)]
pub async fn patch_genre(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(ops): Json<Vec<PatchOperation>>,
) -> Result<impl IntoResponse, AppError> {
    GenreService::patch(&state, id, &ops).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete genre
#[utoipa::path(
    delete,
    path = "/api/v1/genres/{id}",
    params(
        ("id" = i64, Path, description = "Genre ID")
    ),
    responses(
        (status = 204, description = "Genre deleted"),
        (status = 404, description = "Genre not found")
    ),
    tag = "Genres"
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    GenreService::delete(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
