//! List/get/create/replace/patch/delete written once and shared by every
//! resource. A resource names its entity and transport shapes; the store is
//! any `Repository` for that entity.

use std::marker::PhantomData;

use serde::Serialize;
use validator::Validate;

use crate::common::error::{AppError, AppResult};
use crate::common::pagination::{Paged, PaginationQuery};
use crate::common::patch::{self, PatchDocument, PatchOperation};
use crate::common::validation::validate;
use crate::infrastructure::db::store::{Entity, Repository};

pub trait Resource: Send + Sync + 'static {
    type Entity: Entity;
}

pub trait Readable: Resource {
    type Read: From<Self::Entity> + Serialize + Send;
}

/// Resources whose write shape maps straight onto the entity.
pub trait Writable: Readable {
    type Write: Validate + Into<Self::Entity> + Send;
}

pub trait Patchable: Resource {
    type Patch: PatchDocument<Self::Entity>;
}

/// A freshly persisted resource and the id callers need to address it.
#[derive(Debug)]
pub struct Created<T> {
    pub id: i64,
    pub resource: T,
}

pub struct Crud<Res>(PhantomData<Res>);

impl<Res: Readable> Crud<Res> {
    /// Every row in store order.
    pub async fn list_all<R>(repo: &R) -> AppResult<Vec<Res::Read>>
    where
        R: Repository<Res::Entity> + ?Sized,
    {
        let rows = repo.list(None).await?;
        Ok(rows.into_iter().map(Res::Read::from).collect())
    }

    pub async fn list<R>(repo: &R, query: PaginationQuery) -> AppResult<Paged<Res::Read>>
    where
        R: Repository<Res::Entity> + ?Sized,
    {
        let query = query.normalized();
        let count = repo.count().await?;
        let rows = repo.list(query.window()).await?;

        Ok(Paged {
            items: rows.into_iter().map(Res::Read::from).collect(),
            total_pages: query.total_pages(count),
        })
    }

    pub async fn get<R>(repo: &R, id: i64) -> AppResult<Res::Read>
    where
        R: Repository<Res::Entity> + ?Sized,
    {
        Self::load(repo, id).await.map(Res::Read::from)
    }
}

impl<Res: Resource> Crud<Res> {
    pub async fn delete<R>(repo: &R, id: i64) -> AppResult<()>
    where
        R: Repository<Res::Entity> + ?Sized,
    {
        Self::ensure_exists(repo, id).await?;
        repo.delete(id).await?;
        Ok(())
    }

    pub async fn load<R>(repo: &R, id: i64) -> AppResult<Res::Entity>
    where
        R: Repository<Res::Entity> + ?Sized,
    {
        repo.find(id)
            .await?
            .ok_or_else(|| AppError::not_found(<Res::Entity as Entity>::NAME, id))
    }

    pub async fn ensure_exists<R>(repo: &R, id: i64) -> AppResult<()>
    where
        R: Repository<Res::Entity> + ?Sized,
    {
        if repo.exists(id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(<Res::Entity as Entity>::NAME, id))
        }
    }
}

impl<Res: Writable> Crud<Res> {
    pub async fn create<R>(repo: &R, write: Res::Write) -> AppResult<Created<Res::Read>>
    where
        R: Repository<Res::Entity> + ?Sized,
    {
        validate(&write)?;
        let stored = repo.insert(write.into()).await?;

        Ok(Created {
            id: stored.id(),
            resource: Res::Read::from(stored),
        })
    }

    /// Overwrites every field, keeping the id. Never creates.
    pub async fn replace<R>(repo: &R, id: i64, write: Res::Write) -> AppResult<()>
    where
        R: Repository<Res::Entity> + ?Sized,
    {
        validate(&write)?;
        Self::ensure_exists(repo, id).await?;

        let mut entity: Res::Entity = write.into();
        entity.set_id(id);
        repo.update(&entity).await?;
        Ok(())
    }
}

impl<Res: Patchable> Crud<Res> {
    /// Nothing is written unless every operation applies and the patched
    /// document passes validation.
    pub async fn patch<R>(repo: &R, id: i64, ops: &[PatchOperation]) -> AppResult<()>
    where
        R: Repository<Res::Entity> + ?Sized,
    {
        let mut entity = Self::load(repo, id).await?;

        let document = Res::Patch::from_entity(&entity);
        let patched = patch::apply(&document, ops).map_err(AppError::Validation)?;
        validate(&patched)?;

        patched.apply_to(&mut entity);
        repo.update(&entity).await?;
        Ok(())
    }
}
