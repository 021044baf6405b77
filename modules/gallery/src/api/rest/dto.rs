//! Wire shapes: internal field names are renamed to the public camelCase ones.

use chrono::{DateTime, NaiveDate, Utc};
use paging_core::{CursorPageInfo, OffsetPageInfo, Page, PageInfo, PaginationMode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{Album, BoundingBox, Face, Image, ListQuery};

/// Query string of `GET /images` and `GET /albums`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryDto {
    pub pagination_type: Option<PaginationMode>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub next_cursor: Option<String>,
    #[serde(alias = "prevCursor")]
    pub previous_cursor: Option<String>,
    pub album_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ListQueryDto {
    /// The owner comes from the caller identity, never from the query string.
    pub fn into_query(self, owner_id: Uuid) -> ListQuery {
        ListQuery {
            owner_id,
            mode: self.pagination_type.unwrap_or_default(),
            page: self.page,
            limit: self.limit,
            album_id: self.album_id,
            from: self.from,
            to: self.to,
            next_cursor: self.next_cursor,
            previous_cursor: self.previous_cursor,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBoxDto {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FaceDto {
    pub face_id: i64,
    pub bounding_box: BoundingBoxDto,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OriginalSizeDto {
    pub width: i32,
    pub height: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub image_id: i64,
    pub image_path: String,
    pub upload_date: DateTime<Utc>,
    pub update_date: Option<DateTime<Utc>>,
    pub original_size: OriginalSizeDto,
    #[serde(rename = "userId")]
    pub uploaded_by: Uuid,
    pub faces: Vec<FaceDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AlbumDto {
    pub album_id: i64,
    pub album_name: String,
    #[serde(rename = "userId")]
    pub created_by: Uuid,
    pub creation_date: DateTime<Utc>,
    pub shared_link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OffsetPaginationDto {
    pub total: u64,
    pub current_page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub item_start: u64,
    pub item_end: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CursorPaginationDto {
    pub next_cursor: Option<String>,
    pub previous_cursor: Option<String>,
    pub limit: u64,
    pub has_more_items: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PaginationDto {
    Offset(OffsetPaginationDto),
    Cursor(CursorPaginationDto),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImagesPageDto {
    pub images: Vec<ImageDto>,
    pub pagination: PaginationDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlbumsPageDto {
    pub albums: Vec<AlbumDto>,
    pub pagination: PaginationDto,
}

// Conversion implementations from contract models

impl From<BoundingBox> for BoundingBoxDto {
    fn from(b: BoundingBox) -> Self {
        Self {
            top: b.top,
            left: b.left,
            right: b.right,
            bottom: b.bottom,
        }
    }
}

impl From<Face> for FaceDto {
    fn from(f: Face) -> Self {
        Self {
            face_id: f.face_id,
            bounding_box: f.bounding_box.into(),
        }
    }
}

impl From<Image> for ImageDto {
    fn from(i: Image) -> Self {
        Self {
            image_id: i.image_id,
            image_path: i.image_path,
            upload_date: i.upload_date,
            update_date: i.update_date,
            original_size: OriginalSizeDto {
                width: i.original_width,
                height: i.original_height,
            },
            uploaded_by: i.uploaded_by,
            faces: i.faces.into_iter().map(FaceDto::from).collect(),
        }
    }
}

impl From<Album> for AlbumDto {
    fn from(a: Album) -> Self {
        Self {
            album_id: a.album_id,
            album_name: a.album_name,
            created_by: a.created_by,
            creation_date: a.creation_date,
            shared_link: a.shared_link,
        }
    }
}

impl From<OffsetPageInfo> for OffsetPaginationDto {
    fn from(p: OffsetPageInfo) -> Self {
        Self {
            total: p.total,
            current_page: p.current_page,
            limit: p.limit,
            total_pages: p.total_pages,
            has_next_page: p.has_next_page,
            has_previous_page: p.has_previous_page,
            is_first_page: p.is_first_page,
            is_last_page: p.is_last_page,
            item_start: p.item_start,
            item_end: p.item_end,
        }
    }
}

impl From<CursorPageInfo> for CursorPaginationDto {
    fn from(p: CursorPageInfo) -> Self {
        Self {
            next_cursor: p.next_cursor,
            previous_cursor: p.previous_cursor,
            limit: p.limit,
            has_more_items: p.has_more_items,
        }
    }
}

impl From<PageInfo> for PaginationDto {
    fn from(info: PageInfo) -> Self {
        match info {
            PageInfo::Offset(o) => Self::Offset(o.into()),
            PageInfo::Cursor(c) => Self::Cursor(c.into()),
        }
    }
}

impl From<Page<Image>> for ImagesPageDto {
    fn from(page: Page<Image>) -> Self {
        let page = page.map_items(ImageDto::from);
        Self {
            images: page.items,
            pagination: page.pagination.into(),
        }
    }
}

impl From<Page<Album>> for AlbumsPageDto {
    fn from(page: Page<Album>) -> Self {
        let page = page.map_items(AlbumDto::from);
        Self {
            albums: page.items,
            pagination: page.pagination.into(),
        }
    }
}
