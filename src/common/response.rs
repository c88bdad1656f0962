use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::common::validation::FieldError;

/// Out-of-band page count emitted by every paginated listing.
pub const TOTAL_PAGES_HEADER: &str = "totalpages";

#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub status: String,
    pub message: String,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data: Some(data),
            code: None,
            errors: None,
        }
    }

    pub fn error(code: &str, message: &str, errors: Option<Vec<FieldError>>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
            data: None,
            code: Some(code.to_string()),
            errors,
        }
    }
}

pub struct ApiSuccess<T>(pub T, pub StatusCode);

impl<T> IntoResponse for ApiSuccess<ApiResponse<T>>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let (response, status) = (self.0, self.1);
        (status, Json(response)).into_response()
    }
}

/// 200 with the page body and the `totalpages` header.
pub struct ApiPaged<T>(pub ApiResponse<T>, pub i64);

impl<T> IntoResponse for ApiPaged<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let (response, total_pages) = (self.0, self.1);
        (
            StatusCode::OK,
            [(TOTAL_PAGES_HEADER, total_pages.to_string())],
            Json(response),
        )
            .into_response()
    }
}

/// 201 with a `Location` header pointing at the new resource.
pub struct ApiCreated<T>(pub ApiResponse<T>, pub String);

impl<T> IntoResponse for ApiCreated<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let (response, location) = (self.0, self.1);
        (
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(response),
        )
            .into_response()
    }
}
