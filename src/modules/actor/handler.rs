use super::dto::{ActorCreateRequest, ActorResponse};
use super::service::ActorService;
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
    response::IntoResponse,
};

/// List actors, one page at a time
#[utoipa::path(
    get,
    path = "/api/v1/actors",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Page of actors; page count in the totalpages header", body = ApiResponse<Vec<ActorResponse>>)
    ),
    tag = "Actors"
)]
pub async fn list_actors(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = ActorService::find_page(&state, query).await?;
    Ok(ApiPaged(
        ApiResponse::success(page.items, "Actors retrieved successfully"),
        page.total_pages,
    ))
}

/// Get actor by ID
#[utoipa::path(
    get,
    path = "/api/v1/actors/{id}",
    params(
        ("id" = i64, Path, description = "Actor ID")
    ),
    responses(
        (status = 200, description = "Actor details", body = ApiResponse<ActorResponse>),
        (status = 404, description = "Actor not found")
    ),
    tag = "Actors"
)]
pub async fn get_actor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let actor = ActorService::find_by_id(&state, id).await?;
    Ok(ApiSuccess(
        ApiResponse::success(actor, "Actor retrieved successfully"),
        StatusCode::OK,
    ))
}

/// Create actor
/// Multipart form with `name`, `dateOfBirth` and an optional `photo` image
#[utoipa::path(
    post,
    path = "/api/v1/actors",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Actor created", body = ApiResponse<ActorResponse>),
        (status = 400, description = "Validation failed")
    ),
    tag = "Actors"
)]
pub async fn create_actor(
    State(state): State<AppState>,
    form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let req = ActorCreateRequest::from_form(form)?;

    let created = ActorService::create(&state, req).await?;
    Ok(ApiCreated(
        ApiResponse::success(created.resource, "Actor created successfully"),
        format!("/api/v1/actors/{}", created.id),
    ))
}

/// Replace actor
/// Same form as create; the current photo is kept when none is uploaded
#[utoipa::path(
    put,
    path = "/api/v1/actors/{id}",
    params(
        ("id" = i64, Path, description = "Actor ID")
    ),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 204, description = "Actor updated"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Actor not found")
    ),
    tag = "Actors"
)]
pub async fn update_actor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    form: MultipartForm,
) -> Result<impl IntoResponse, AppError> {
    let req = ActorCreateRequest::from_form(form)?;

    ActorService::update(&state, id, req).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Partially update actor
#[utoipa::path(
    patch,
    path = "/api/v1/actors/{id}",
    params(
        ("id" = i64, Path, description = "Actor ID")
    ),
    request_body = Vec<PatchOperation>,
    responses(
        (status = 204, description = "Actor patched"),
        (status = 400, description = "Patched actor is invalid"),
        (status = 404, description = "Actor not found")
    ),
    tag = "Actors"
)]
pub async fn patch_actor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(ops): Json<Vec<PatchOperation>>,
) -> Result<impl IntoResponse, AppError> {
    ActorService::patch(&state, id, &ops).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete actor and its photo
#[utoipa::path(
    delete,
    path = "/api/v1/actors/{id}",
    params(
        ("id" = i64, Path, description = "Actor ID")
    ),
    responses(
        (status = 204, description = "Actor deleted"),
        (status = 404, description = "Actor not found")
    ),
    tag = "Actors"
)]
pub async fn delete_actor(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    ActorService::delete(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
