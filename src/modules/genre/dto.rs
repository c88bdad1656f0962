use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::PatchDocument;
use crate::modules::genre::model::Genre;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GenreCreateRequest {
    #[validate(length(min = 1, max = 40, message = "Name must be between 1 and 40 characters"))]
    pub name: String,
}

impl From<GenreCreateRequest> for Genre {
    fn from(req: GenreCreateRequest) -> Self {
        Self {
            id: 0,
            name: req.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct GenreResponse {
    pub id: i64,
    pub name: String,
}

impl From<Genre> for GenreResponse {
    fn from(g: Genre) -> Self {
        Self {
            id: g.id,
            name: g.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct GenrePatch {
    #[validate(length(min = 1, max = 40, message = "Name must be between 1 and 40 characters"))]
    pub name: String,
}

impl PatchDocument<Genre> for GenrePatch {
    fn from_entity(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }

    fn apply_to(self, genre: &mut Genre) {
        genre.name = self.name;
    }
}
