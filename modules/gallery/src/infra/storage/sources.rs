//! `RecordSource` implementations over SeaORM.
//!
//! Generic over `C: ConnectionTrait`, so they can be built with a
//! `DatabaseConnection` or a transaction.

use std::collections::HashMap;

use anyhow::Context;
use async_trait::async_trait;
use paging_core::{Collection, Filter, RecordSource, Window};
use paging_db::EntitySource;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::contract::model::{Album, Face, Image};
use crate::infra::storage::entity::{albums, faces, images};
use crate::infra::storage::mapper;

/// Images with their faces attached.
pub struct ImageSource<C> {
    inner: EntitySource<images::Entity, C>,
}

impl<C> ImageSource<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self {
            inner: EntitySource::new(conn),
        }
    }

    /// Faces of `image_ids`, grouped per image and ordered by face id.
    async fn faces_of(&self, image_ids: &[i64]) -> anyhow::Result<HashMap<i64, Vec<Face>>> {
        if image_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = faces::Entity::find()
            .filter(faces::Column::ImageId.is_in(image_ids.iter().copied()))
            .order_by_asc(faces::Column::FaceId)
            .all(self.inner.conn())
            .await
            .context("loading faces failed")?;

        let mut grouped: HashMap<i64, Vec<Face>> = HashMap::new();
        for row in rows {
            let image_id = row.image_id;
            grouped.entry(image_id).or_default().push(row.try_into()?);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl<C> RecordSource for ImageSource<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    type Record = Image;

    fn collection(&self) -> Collection {
        self.inner.collection()
    }

    async fn count(&self, filter: &Filter) -> anyhow::Result<u64> {
        self.inner.count(filter).await
    }

    async fn find_many(&self, filter: &Filter, window: Window) -> anyhow::Result<Vec<Image>> {
        let rows = self.inner.find_many(filter, window).await?;
        let ids: Vec<i64> = rows.iter().map(|m| m.image_id).collect();
        let mut faces = self.faces_of(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let own = faces.remove(&m.image_id).unwrap_or_default();
                mapper::image_from(m, own)
            })
            .collect())
    }
}

pub struct AlbumSource<C> {
    inner: EntitySource<albums::Entity, C>,
}

impl<C> AlbumSource<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self {
            inner: EntitySource::new(conn),
        }
    }
}

#[async_trait]
impl<C> RecordSource for AlbumSource<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    type Record = Album;

    fn collection(&self) -> Collection {
        self.inner.collection()
    }

    async fn count(&self, filter: &Filter) -> anyhow::Result<u64> {
        self.inner.count(filter).await
    }

    async fn find_many(&self, filter: &Filter, window: Window) -> anyhow::Result<Vec<Album>> {
        let rows = self.inner.find_many(filter, window).await?;
        Ok(rows.into_iter().map(Album::from).collect())
    }
}
