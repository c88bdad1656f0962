use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;
use validator::Validate;

use crate::common::error::AppResult;
use crate::common::patch::PatchDocument;
use crate::common::upload::{FileUpload, MultipartForm};
use crate::common::validation::validate_with;
use crate::modules::actor::model::Actor;

/// Multipart fields: `name`, `dateOfBirth`, optional `photo` file.
#[derive(Debug, Validate)]
pub struct ActorCreateRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: String,
    pub date_of_birth: Date,
    pub photo: Option<FileUpload>,
}

impl ActorCreateRequest {
    pub fn from_form(mut form: MultipartForm) -> AppResult<Self> {
        let mut reader = form.reader();
        let name = reader.string("name");
        let date_of_birth = reader.date("dateOfBirth");
        let mut errors = reader.finish();

        let photo = form.take_file("photo");
        if let Some(photo) = &photo {
            errors.extend(photo.check_image("photo"));
        }

        // A missing date is already reported in `errors`, so the placeholder never persists.
        let req = Self {
            name,
            date_of_birth: date_of_birth.unwrap_or(Date::MIN),
            photo,
        };
        validate_with(&req, errors)?;
        Ok(req)
    }
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActorResponse {
    pub id: i64,
    pub name: String,
    #[schema(value_type = String, format = Date)]
    pub date_of_birth: Date,
    pub photo: Option<String>,
}

impl From<Actor> for ActorResponse {
    fn from(a: Actor) -> Self {
        Self {
            id: a.id,
            name: a.name,
            date_of_birth: a.date_of_birth,
            photo: a.photo,
        }
    }
}

/// Editable fields of an actor. The photo only changes through `PUT`.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActorPatch {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    pub name: String,
    pub date_of_birth: Date,
}

impl PatchDocument<Actor> for ActorPatch {
    fn from_entity(actor: &Actor) -> Self {
        Self {
            name: actor.name.clone(),
            date_of_birth: actor.date_of_birth,
        }
    }

    fn apply_to(self, actor: &mut Actor) {
        actor.name = self.name;
        actor.date_of_birth = self.date_of_birth;
    }
}
