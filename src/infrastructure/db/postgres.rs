//! `Repository` over PostgreSQL for every entity that describes its table.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;
use sqlx::{FromRow, PgExecutor, Postgres, QueryBuilder};

use crate::common::pagination::PageWindow;
use crate::infrastructure::db::pool::DbPool;
use crate::infrastructure::db::store::{Entity, Repository, StoreError};

/// Table mapping for an entity. `COLUMNS` excludes `id`, which the store
/// assigns, and must match the order `bind_columns` pushes values in.
pub trait PgTable: Entity + for<'r> FromRow<'r, PgRow> + Unpin {
    const TABLE: &'static str;
    const COLUMNS: &'static [&'static str];

    fn bind_columns<'args>(&self, values: &mut Separated<'_, 'args, Postgres, &'static str>);
}

#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

pub(crate) async fn insert_row<'e, E, X>(executor: X, entity: &E) -> Result<E, sqlx::Error>
where
    E: PgTable,
    X: PgExecutor<'e>,
{
    let mut qb = QueryBuilder::<Postgres>::new("INSERT INTO ");
    qb.push(E::TABLE)
        .push(" (")
        .push(E::COLUMNS.join(", "))
        .push(") VALUES (");
    {
        let mut values = qb.separated(", ");
        entity.bind_columns(&mut values);
    }
    qb.push(") RETURNING *");

    qb.build_query_as::<E>().fetch_one(executor).await
}

pub(crate) async fn update_row<'e, E, X>(executor: X, entity: &E) -> Result<u64, sqlx::Error>
where
    E: PgTable,
    X: PgExecutor<'e>,
{
    // Multi-column assignment needs ROW() so a single column still parses.
    let mut qb = QueryBuilder::<Postgres>::new("UPDATE ");
    qb.push(E::TABLE)
        .push(" SET (")
        .push(E::COLUMNS.join(", "))
        .push(") = ROW(");
    {
        let mut values = qb.separated(", ");
        entity.bind_columns(&mut values);
    }
    qb.push(") WHERE id = ").push_bind(entity.id());

    let result = qb.build().execute(executor).await?;
    Ok(result.rows_affected())
}

pub(crate) fn push_window(qb: &mut QueryBuilder<'_, Postgres>, window: Option<PageWindow>) {
    if let Some(window) = window {
        qb.push(" LIMIT ").push_bind(window.limit);
        qb.push(" OFFSET ").push_bind(window.offset);
    }
}

#[async_trait]
impl<E: PgTable> Repository<E> for PgStore {
    async fn count(&self) -> Result<i64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::TABLE);
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn list(&self, window: Option<PageWindow>) -> Result<Vec<E>, StoreError> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM ");
        qb.push(E::TABLE).push(" ORDER BY id");
        push_window(&mut qb, window);

        let rows = qb.build_query_as::<E>().fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> Result<Option<E>, StoreError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", E::TABLE);
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", E::TABLE);
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn insert(&self, entity: E) -> Result<E, StoreError> {
        Ok(insert_row(&self.pool, &entity).await?)
    }

    async fn update(&self, entity: &E) -> Result<(), StoreError> {
        update_row(&self.pool, entity).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }
}
