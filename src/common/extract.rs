//! `Json`, `Path` and `Query` extractors whose rejections go through
//! `AppError`, so malformed input gets the standard error envelope.

use axum::extract::path::ErrorKind;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::common::error::AppError;
use crate::common::validation::FieldError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => AppError::Validation(vec![field_error(&e.body_text())]),
            JsonRejection::JsonSyntaxError(_) => AppError::BadRequest("The request body is not valid JSON".to_string()),
            JsonRejection::MissingJsonContentType(_) => {
                AppError::BadRequest("Expected request with `Content-Type: application/json`".to_string())
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        match rejection {
            QueryRejection::FailedToDeserializeQueryString(e) => {
                AppError::Validation(vec![field_error(&e.body_text())])
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        let message = match &rejection {
            PathRejection::FailedToDeserializePathParams(e) => match e.kind() {
                ErrorKind::ParseErrorAtKey { key, value, .. } => {
                    format!("The value '{value}' is not valid for '{key}'")
                }
                ErrorKind::ParseErrorAtIndex { value, .. } | ErrorKind::ParseError { value, .. } => {
                    format!("The value '{value}' is not valid")
                }
                _ => "Invalid path parameters".to_string(),
            },
            _ => "Invalid path parameters".to_string(),
        };
        AppError::BadRequest(message)
    }
}

/// Turns a serde message such as ``missing field `name` at line 1 column 2``
/// or `genreId: invalid digit found in string` into a field error.
fn field_error(body_text: &str) -> FieldError {
    let detail = body_text
        .split_once("target type: ")
        .or_else(|| body_text.split_once("query string: "))
        .map_or(body_text, |(_, detail)| detail);
    let detail = detail.rsplit_once(" at line ").map_or(detail, |(head, _)| head);

    if let Some(field) = detail
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split_once('`'))
        .map(|(field, _)| field)
    {
        return FieldError::new(field, format!("The {field} field is required"));
    }

    match detail.split_once(": ") {
        Some((path, _)) if !path.contains(' ') => FieldError::new(path, "The value is not valid for this field"),
        _ => FieldError::new("", "The request is not valid"),
    }
}
