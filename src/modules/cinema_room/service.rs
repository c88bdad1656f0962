use super::dto::{CinemaRoomCreateRequest, CinemaRoomResponse};
use super::model::CinemaRoom;
use crate::common::error::AppResult;
use crate::common::pagination::{Paged, PaginationQuery};
use crate::common::patch::PatchOperation;
use crate::common::resource::{Created, Crud, Patchable, Readable, Resource, Writable};
use crate::state::AppState;

pub struct CinemaRoomResource;

impl Resource for CinemaRoomResource {
    type Entity = CinemaRoom;
}

impl Readable for CinemaRoomResource {
    type Read = CinemaRoomResponse;
}

impl Writable for CinemaRoomResource {
    type Write = CinemaRoomCreateRequest;
}

// The write shape doubles as the patch shape: every field is editable.
impl Patchable for CinemaRoomResource {
    type Patch = CinemaRoomCreateRequest;
}

type Rooms = Crud<CinemaRoomResource>;

pub struct CinemaRoomService;

impl CinemaRoomService {
    pub async fn find_page(state: &AppState, query: PaginationQuery) -> AppResult<Paged<CinemaRoomResponse>> {
        Rooms::list(state.cinema_rooms.as_ref(), query).await
    }

    pub async fn find_by_id(state: &AppState, id: i64) -> AppResult<CinemaRoomResponse> {
        Rooms::get(state.cinema_rooms.as_ref(), id).await
    }

    pub async fn create(
        state: &AppState,
        req: CinemaRoomCreateRequest,
    ) -> AppResult<Created<CinemaRoomResponse>> {
        Rooms::create(state.cinema_rooms.as_ref(), req).await
    }

    pub async fn update(state: &AppState, id: i64, req: CinemaRoomCreateRequest) -> AppResult<()> {
        Rooms::replace(state.cinema_rooms.as_ref(), id, req).await
    }

    pub async fn patch(state: &AppState, id: i64, ops: &[PatchOperation]) -> AppResult<()> {
        Rooms::patch(state.cinema_rooms.as_ref(), id, ops).await
    }

    pub async fn delete(state: &AppState, id: i64) -> AppResult<()> {
        Rooms::delete(state.cinema_rooms.as_ref(), id).await
    }
}
