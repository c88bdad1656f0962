use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::patch::PatchDocument;
use crate::modules::cinema_room::model::CinemaRoom;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CinemaRoomCreateRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl From<CinemaRoomCreateRequest> for CinemaRoom {
    fn from(req: CinemaRoomCreateRequest) -> Self {
        Self {
            id: 0,
            name: req.name,
            latitude: req.latitude,
            longitude: req.longitude,
        }
    }
}

impl PatchDocument<CinemaRoom> for CinemaRoomCreateRequest {
    fn from_entity(room: &CinemaRoom) -> Self {
        Self {
            name: room.name.clone(),
            latitude: room.latitude,
            longitude: room.longitude,
        }
    }

    fn apply_to(self, room: &mut CinemaRoom) {
        room.name = self.name;
        room.latitude = self.latitude;
        room.longitude = self.longitude;
    }
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct CinemaRoomResponse {
    pub id: i64,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<CinemaRoom> for CinemaRoomResponse {
    fn from(room: CinemaRoom) -> Self {
        Self {
            id: room.id,
            name: room.name,
            latitude: room.latitude,
            longitude: room.longitude,
        }
    }
}
