use tracing::warn;

use super::dto::{ActorCreateRequest, ActorPatch, ActorResponse};
use super::model::Actor;
use crate::common::error::AppResult;
use crate::common::pagination::{Paged, PaginationQuery};
use crate::common::patch::PatchOperation;
use crate::common::resource::{Created, Crud, Patchable, Readable, Resource};
use crate::common::upload::FileUpload;
use crate::state::AppState;

/// Storage container for actor photos.
pub const PHOTO_CONTAINER: &str = "actors";

pub struct ActorResource;

impl Resource for ActorResource {
    type Entity = Actor;
}

impl Readable for ActorResource {
    type Read = ActorResponse;
}

impl Patchable for ActorResource {
    type Patch = ActorPatch;
}

type Actors = Crud<ActorResource>;

pub struct ActorService;

impl ActorService {
    pub async fn find_page(state: &AppState, query: PaginationQuery) -> AppResult<Paged<ActorResponse>> {
        Actors::list(state.actors.as_ref(), query).await
    }

    pub async fn find_by_id(state: &AppState, id: i64) -> AppResult<ActorResponse> {
        Actors::get(state.actors.as_ref(), id).await
    }

    pub async fn create(state: &AppState, req: ActorCreateRequest) -> AppResult<Created<ActorResponse>> {
        let photo = match &req.photo {
            Some(upload) => Some(save_photo(state, upload).await?),
            None => None,
        };

        let actor = Actor {
            id: 0,
            name: req.name,
            date_of_birth: req.date_of_birth,
            photo,
        };

        let stored = match state.actors.insert(actor.clone()).await {
            Ok(stored) => stored,
            Err(e) => {
                discard_photo(state, actor.photo.as_deref()).await;
                return Err(e.into());
            }
        };

        Ok(Created {
            id: stored.id,
            resource: stored.into(),
        })
    }

    /// Replaces name and date of birth. The photo is swapped only when a new
    /// one is uploaded; the previous file is removed once the row is written.
    pub async fn update(state: &AppState, id: i64, req: ActorCreateRequest) -> AppResult<()> {
        let mut actor = Actors::load(state.actors.as_ref(), id).await?;
        let previous_photo = actor.photo.clone();

        let new_photo = match &req.photo {
            Some(upload) => Some(save_photo(state, upload).await?),
            None => None,
        };
        if new_photo.is_some() {
            actor.photo = new_photo.clone();
        }
        actor.name = req.name;
        actor.date_of_birth = req.date_of_birth;

        if let Err(e) = state.actors.update(&actor).await {
            discard_photo(state, new_photo.as_deref()).await;
            return Err(e.into());
        }
        if new_photo.is_some() {
            discard_photo(state, previous_photo.as_deref()).await;
        }
        Ok(())
    }

    pub async fn patch(state: &AppState, id: i64, ops: &[PatchOperation]) -> AppResult<()> {
        Actors::patch(state.actors.as_ref(), id, ops).await
    }

    pub async fn delete(state: &AppState, id: i64) -> AppResult<()> {
        let actor = Actors::load(state.actors.as_ref(), id).await?;
        state.actors.delete(id).await?;
        discard_photo(state, actor.photo.as_deref()).await;
        Ok(())
    }
}

async fn save_photo(state: &AppState, upload: &FileUpload) -> AppResult<String> {
    let reference = state
        .storage
        .save(
            upload.content.clone(),
            &upload.extension(),
            PHOTO_CONTAINER,
            &upload.content_type,
        )
        .await?;
    Ok(reference)
}

async fn discard_photo(state: &AppState, photo: Option<&str>) {
    if let Some(photo) = photo {
        if let Err(e) = state.storage.delete(photo, PHOTO_CONTAINER).await {
            warn!(error = %e, photo, "Failed to remove actor photo");
        }
    }
}
