use super::dto::{CinemaRoomCreateRequest, CinemaRoomResponse};
use super::service::CinemaRoomService;
use crate::common::error::AppError;
use crate::common::extract::{Json, Path, Query};
use crate::common::pagination::PaginationQuery;
use crate::common::patch::PatchOperation;
use crate::common::response::{ApiCreated, ApiPaged, ApiResponse, ApiSuccess};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

#[utoipa::path(
    get,
    path = "/api/v1/cinema-rooms",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of cinema rooms", body = ApiResponse<Vec<CinemaRoomResponse>>)
    ),
    tag = "Cinema rooms"
)]
pub async fn list_cinema_rooms(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = CinemaRoomService::find_page(&state, query).await?;
    Ok(ApiPaged(
        ApiResponse::success(page.items, "Cinema rooms retrieved successfully"),
        page.total_pages,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/cinema-rooms/{id}",
    params(
        ("id" = i64, Path, description = "Cinema room ID")
    ),
    responses(
        (status = 200, description = "Cinema room details", body = ApiResponse<CinemaRoomResponse>),
        (status = 404, description = "Cinema room not found")
    ),
    tag = "Cinema rooms"
)]
pub async fn get_cinema_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let room = CinemaRoomService::find_by_id(&state, id).await?;
    Ok(ApiSuccess(
        ApiResponse::success(room, "Cinema room retrieved successfully"),
        StatusCode::OK,
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/cinema-rooms",
    request_body = CinemaRoomCreateRequest,
    responses(
        (status = 201, description = "Cinema room created", body = ApiResponse<CinemaRoomResponse>),
        (status = 400, description = "Validation failed")
    ),
    tag = "Cinema rooms"
)]
pub async fn create_cinema_room(
    State(state): State<AppState>,
    Json(payload): Json<CinemaRoomCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = CinemaRoomService::create(&state, payload).await?;
    Ok(ApiCreated(
        ApiResponse::success(created.resource, "Cinema room created successfully"),
        format!("/api/v1/cinema-rooms/{}", created.id),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/cinema-rooms/{id}",
    params(
        ("id" = i64, Path, description = "Cinema room ID")
    ),
    request_body = CinemaRoomCreateRequest,
    responses(
        (status = 204, description = "Cinema room updated"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Cinema room not found")
    ),
    tag = "Cinema rooms"
)]
pub async fn update_cinema_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CinemaRoomCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    CinemaRoomService::update(&state, id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    patch,
    path = "/api/v1/cinema-rooms/{id}",
    params(
        ("id" = i64, Path, description = "Cinema room ID")
    ),
    request_body = Vec<PatchOperation>,
    responses(
        (status = 204, description = "Cinema room patched"),
        (status = 400, description = "Patched cinema room is invalid"),
        (status = 404, description = "Cinema room not found")
    ),
    tag = "Cinema rooms"
)]
pub async fn patch_cinema_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(ops): Json<Vec<PatchOperation>>,
) -> Result<impl IntoResponse, AppError> {
    CinemaRoomService::patch(&state, id, &ops).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/api/v1/cinema-rooms/{id}",
    params(
        ("id" = i64, Path, description = "Cinema room ID")
    ),
    responses(
        (status = 204, description = "Cinema room deleted"),
        (status = 404, description = "Cinema room not found")
    ),
    tag = "Cinema rooms"
)]
pub async fn delete_cinema_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    CinemaRoomService::delete(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
