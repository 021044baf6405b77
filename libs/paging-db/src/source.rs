use std::marker::PhantomData;

use anyhow::Context;
use async_trait::async_trait;
use paging_core::{Collection, Filter, RecordSource, SortKeyed, Window};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};
use tracing::trace;

use crate::{PagedEntity, PagedSelectExt};

/// [`RecordSource`] over a single SeaORM entity.
///
/// Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
/// or a transaction alike. Records are the entity's bare models.
pub struct EntitySource<E, C> {
    conn: C,
    _entity: PhantomData<fn() -> E>,
}

impl<E, C> EntitySource<E, C>
where
    E: PagedEntity,
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    pub fn conn(&self) -> &C {
        &self.conn
    }
}

#[async_trait]
impl<E, C> RecordSource for EntitySource<E, C>
where
    E: PagedEntity,
    E::Model: SortKeyed + Send + Sync,
    C: ConnectionTrait + Send + Sync + 'static,
{
    type Record = E::Model;

    fn collection(&self) -> Collection {
        E::COLLECTION
    }

    async fn count(&self, filter: &Filter) -> anyhow::Result<u64> {
        let select = E::find().apply_paging_filter(filter)?;
        let total = select
            .count(&self.conn)
            .await
            .with_context(|| format!("count {} failed", E::COLLECTION))?;
        trace!(collection = %E::COLLECTION, total, "counted");
        Ok(total)
    }

    async fn find_many(&self, filter: &Filter, window: Window) -> anyhow::Result<Vec<E::Model>> {
        let rows = E::find()
            .apply_paging_filter(filter)?
            .order_by_sort_key(filter.order())
            .apply_window(window)
            .all(&self.conn)
            .await
            .with_context(|| format!("find_many {} failed", E::COLLECTION))?;
        trace!(collection = %E::COLLECTION, rows = rows.len(), "fetched");
        Ok(rows)
    }
}
