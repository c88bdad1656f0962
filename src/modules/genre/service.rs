use super::dto::{GenreCreateRequest, GenrePatch, GenreResponse};
use super::model::Genre;
use crate::common::error::AppResult;
use crate::common::patch::PatchOperation;
use crate::common::resource::{Created, Crud, Patchable, Readable, Resource, Writable};
use crate::state::AppState;

pub struct GenreResource;

impl Resource for GenreResource {
    type Entity = Genre;
}

impl Readable for GenreResource {
    type Read = GenreResponse;
}

impl Writable for GenreResource {
    type Write = GenreCreateRequest;
}

impl Patchable for GenreResource {
    type Patch = GenrePatch;
}

type Genres = Crud<GenreResource>;

pub struct GenreService;

impl GenreService {
    pub async fn find_all(state: &AppState) -> AppResult<Vec<GenreResponse>> {
        Genres::list_all(state.genres.as_ref()).await
    }

    pub async fn find_by_id(state: &AppState, id: i64) -> AppResult<GenreResponse> {
        Genres::get(state.genres.as_ref(), id).await
    }

    pub async fn create(state: &AppState, req: GenreCreateRequest) -> AppResult<Created<GenreResponse>> {
        Genres::create(state.genres.as_ref(), req).await
    }

    pub async fn update(state: &AppState, id: i64, req: GenreCreateRequest) -> AppResult<()> {
        Genres::replace(state.genres.as_ref(), id, req).await
    }

    pub async fn patch(state: &AppState, id: i64, ops: &[PatchOperation]) -> AppResult<()> {
        Genres::patch(state.genres.as_ref(), id, ops).await
    }

    pub async fn delete(state: &AppState, id: i64) -> AppResult<()> {
        Genres::delete(state.genres.as_ref(), id).await
    }
}
