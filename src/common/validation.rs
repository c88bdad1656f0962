use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::common::error::AppError;

/// One rejected field and the reason, named as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Runs the declared constraints of a write or patch shape.
pub fn validate<T: Validate>(value: &T) -> Result<(), AppError> {
    value
        .validate()
        .map_err(|errors| AppError::Validation(field_errors(&errors)))
}

/// Like [`validate`] but folds in errors found outside the derive (uploads,
/// form parsing) so the caller sees every problem at once.
pub fn validate_with<T: Validate>(value: &T, mut extra: Vec<FieldError>) -> Result<(), AppError> {
    if let Err(errors) = value.validate() {
        extra.extend(field_errors(&errors));
    }
    if extra.is_empty() {
        return Ok(());
    }
    extra.sort_by(|a, b| a.field.cmp(&b.field));
    Err(AppError::Validation(extra))
}

pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let name = join(prefix, &to_camel_case(field));
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("The {name} field is invalid ({})", error.code));
                    out.push(FieldError::new(&name, message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &name, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{name}[{index}]"), out);
                }
            }
        }
    }
}

fn join(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
