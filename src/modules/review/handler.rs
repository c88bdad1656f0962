use super::dto::{ReviewCreateRequest, ReviewResponse};
use super::service::ReviewService;
use crate::common::error::AppError;
use crate::common::extract::{Json, Path, Query};
use crate::common::pagination::PaginationQuery;
use crate::common::response::{ApiCreated, ApiPaged, ApiResponse};
use crate::middleware::auth::TokenClaims;
use crate::state::AppState;
use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::IntoResponse,
};

/// List reviews of a movie
#[utoipa::path(
    get,
    path = "/api/v1/movies/{id}/reviews",
    params(
        ("id" = i64, Path, description = "Movie ID"),
        PaginationQuery
    ),
    responses(
        (status = 200, description = "Page of reviews", body = ApiResponse<Vec<ReviewResponse>>),
        (status = 404, description = "Movie not found")
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(movie_id): Path<i64>,
    Query(query): Query<PaginationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = ReviewService::find_page(&state, movie_id, query).await?;
    Ok(ApiPaged(
        ApiResponse::success(page.items, "Reviews retrieved successfully"),
        page.total_pages,
    ))
}

/// Review a movie
#[utoipa::path(
    post,
    path = "/api/v1/movies/{id}/reviews",
    params(
        ("id" = i64, Path, description = "Movie ID")
    ),
    request_body = ReviewCreateRequest,
    responses(
        (status = 201, description = "Review created", body = ApiResponse<ReviewResponse>),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Movie not found"),
        (status = 409, description = "Caller already reviewed this movie")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
pub async fn create_review(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path(movie_id): Path<i64>,
    Json(payload): Json<ReviewCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let created = ReviewService::create(&state, movie_id, &claims.sub, payload).await?;
    Ok(ApiCreated(
        ApiResponse::success(created.resource, "Review created successfully"),
        format!("/api/v1/movies/{movie_id}/reviews"),
    ))
}

/// Replace own review
#[utoipa::path(
    put,
    path = "/api/v1/movies/{id}/reviews/{review_id}",
    params(
        ("id" = i64, Path, description = "Movie ID"),
        ("review_id" = i64, Path, description = "Review ID")
    ),
    request_body = ReviewCreateRequest,
    responses(
        (status = 204, description = "Review updated"),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Review belongs to another user"),
        (status = 404, description = "Movie or review not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
pub async fn update_review(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path((movie_id, review_id)): Path<(i64, i64)>,
    Json(payload): Json<ReviewCreateRequest>,
) -> Result<impl IntoResponse, AppError> {
    ReviewService::update(&state, movie_id, review_id, &claims.sub, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete own review
#[utoipa::path(
    delete,
    path = "/api/v1/movies/{id}/reviews/{review_id}",
    params(
        ("id" = i64, Path, description = "Movie ID"),
        ("review_id" = i64, Path, description = "Review ID")
    ),
    responses(
        (status = 204, description = "Review deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Review belongs to another user"),
        (status = 404, description = "Movie or review not found")
    ),
    tag = "Reviews",
    security(("bearer_auth" = []))
)]
pub async fn delete_review(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    Path((movie_id, review_id)): Path<(i64, i64)>,
) -> Result<impl IntoResponse, AppError> {
    ReviewService::delete(&state, movie_id, review_id, &claims.sub).await?;
    Ok(StatusCode::NO_CONTENT)
}
