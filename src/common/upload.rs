//! Multipart form handling for the resources that carry an image
//! (actor photo, movie poster).

use std::collections::HashMap;
use std::path::Path;

use axum::body::Bytes;
use axum::extract::multipart::{Field, Multipart};
use axum::extract::{FromRequest, Request};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use time::macros::format_description;
use time::Date;
use tracing::error;

use crate::common::error::AppError;
use crate::common::validation::FieldError;

pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;

const IMAGE_SUBTYPES: [&str; 4] = ["jpeg", "jpg", "png", "gif"];

#[derive(Debug, Clone)]
pub struct FileUpload {
    pub content: Bytes,
    pub file_name: String,
    pub content_type: String,
}

impl FileUpload {
    /// Extension with its leading dot, from the file name or else the content type.
    pub fn extension(&self) -> String {
        if let Some(ext) = Path::new(&self.file_name).extension().and_then(|e| e.to_str()) {
            return format!(".{}", ext.to_ascii_lowercase());
        }
        mime_guess::get_mime_extensions_str(&self.content_type)
            .and_then(|exts| exts.first())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default()
    }

    pub fn check_image(&self, field: &str) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.content.len() > MAX_IMAGE_BYTES {
            errors.push(FieldError::new(field, "File size must not exceed 4 MB"));
        }
        if !is_accepted_image(&self.content_type) {
            errors.push(FieldError::new(
                field,
                "Only jpeg, jpg, png and gif images are allowed",
            ));
        }
        errors
    }
}

fn is_accepted_image(content_type: &str) -> bool {
    let Ok(parsed) = content_type.parse::<mime::Mime>() else {
        return false;
    };
    parsed.type_() == mime::IMAGE && IMAGE_SUBTYPES.contains(&parsed.subtype().as_str())
}

/// Text parts and file parts of one multipart request, keyed by part name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    text: HashMap<String, String>,
    files: HashMap<String, FileUpload>,
}

impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Self::read(multipart).await
    }
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name.is_empty() {
                continue;
            }

            if field.file_name().is_some() {
                let upload = read_file(field).await?;
                // An empty file input is sent as a nameless zero-byte part.
                if !upload.content.is_empty() {
                    form.files.insert(name, upload);
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable form field '{name}': {e}")))?;
                form.text.insert(name, value);
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    pub fn take_file(&mut self, name: &str) -> Option<FileUpload> {
        self.files.remove(name)
    }

    pub fn reader(&self) -> FormReader<'_> {
        FormReader {
            form: self,
            errors: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(text: &[(&str, &str)]) -> Self {
        Self {
            text: text
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            files: HashMap::new(),
        }
    }
}

async fn read_file(mut field: Field<'_>) -> Result<FileUpload, AppError> {
    let file_name = field.file_name().unwrap_or("").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let mut buffer = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| {
            error!("Stream error: {}", e);
            AppError::BadRequest("Upload stream interrupted".to_string())
        })?;
        buffer.extend_from_slice(&chunk);
    }

    Ok(FileUpload {
        content: Bytes::from(buffer),
        file_name,
        content_type,
    })
}

/// Typed access to text parts. Problems are collected rather than returned so
/// one response can list every bad field.
pub struct FormReader<'a> {
    form: &'a MultipartForm,
    errors: Vec<FieldError>,
}

impl FormReader<'_> {
    /// Missing text becomes an empty string and is left to the length checks.
    pub fn string(&mut self, name: &str) -> String {
        self.form.text(name).unwrap_or_default().to_string()
    }

    /// `true`/`false`, any case. Absent means false.
    pub fn boolean(&mut self, name: &str) -> bool {
        match self.form.text(name).map(str::trim) {
            None | Some("") => false,
            Some(value) if value.eq_ignore_ascii_case("true") => true,
            Some(value) if value.eq_ignore_ascii_case("false") => false,
            Some(_) => {
                self.errors.push(FieldError::new(name, "Invalid value type"));
                false
            }
        }
    }

    /// `YYYY-MM-DD`; anything after the date part (a time, an offset) is ignored.
    pub fn date(&mut self, name: &str) -> Option<Date> {
        let Some(raw) = self.form.text(name).map(str::trim).filter(|v| !v.is_empty()) else {
            self.errors
                .push(FieldError::new(name, format!("The {name} field is required")));
            return None;
        };

        let date_part = raw.get(..10).unwrap_or(raw);
        match Date::parse(date_part, format_description!("[year]-[month]-[day]")) {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors.push(FieldError::new(name, "Invalid value type"));
                None
            }
        }
    }

    /// A JSON-encoded part. Absent means the default value.
    pub fn json<T: DeserializeOwned + Default>(&mut self, name: &str) -> T {
        let Some(raw) = self.form.text(name).map(str::trim).filter(|v| !v.is_empty()) else {
            return T::default();
        };
        serde_json::from_str(raw).unwrap_or_else(|_| {
            self.errors.push(FieldError::new(name, "Invalid value type"));
            T::default()
        })
    }

    pub fn finish(self) -> Vec<FieldError> {
        self.errors
    }
}
