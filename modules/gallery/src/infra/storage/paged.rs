//! Column mapping for the two queryable collections.

use paging_core::{Collection, SortKey, SortKeyed};
use paging_db::PagedEntity;
use sea_orm::sea_query::{Query, SimpleExpr};
use sea_orm::ColumnTrait;

use super::entity::{album_images, albums, images};

impl PagedEntity for images::Entity {
    const COLLECTION: Collection = Collection::Images;

    fn sort_key_column() -> images::Column {
        images::Column::ImageId
    }

    fn owner_column() -> Option<images::Column> {
        Some(images::Column::UploadedBy)
    }

    fn timestamp_column() -> images::Column {
        images::Column::UploadDate
    }

    fn membership(album_id: SortKey) -> Option<SimpleExpr> {
        let linked = Query::select()
            .column(album_images::Column::ImageId)
            .from(album_images::Entity)
            .and_where(album_images::Column::AlbumId.eq(album_id))
            .to_owned();
        Some(images::Column::ImageId.in_subquery(linked))
    }
}

impl PagedEntity for albums::Entity {
    const COLLECTION: Collection = Collection::Albums;

    fn sort_key_column() -> albums::Column {
        albums::Column::AlbumId
    }

    fn owner_column() -> Option<albums::Column> {
        Some(albums::Column::CreatedBy)
    }

    fn timestamp_column() -> albums::Column {
        albums::Column::CreationDate
    }
}

impl SortKeyed for images::Model {
    fn sort_key(&self) -> SortKey {
        self.image_id
    }
}

impl SortKeyed for albums::Model {
    fn sort_key(&self) -> SortKey {
        self.album_id
    }
}
