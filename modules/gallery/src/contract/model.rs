use chrono::{DateTime, NaiveDate, Utc};
use paging_core::{FilterParams, PageRequest, PaginationMode, SortKey, SortKeyed};
use uuid::Uuid;

/// Stored image with its detected faces (transport-agnostic).
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub image_id: i64,
    pub image_path: String,
    pub upload_date: DateTime<Utc>,
    pub update_date: Option<DateTime<Utc>>,
    pub original_width: i32,
    pub original_height: i32,
    pub uploaded_by: Uuid,
    pub faces: Vec<Face>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub face_id: i64,
    pub bounding_box: BoundingBox,
}

/// Face rectangle in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub album_id: i64,
    pub album_name: String,
    pub created_by: Uuid,
    pub creation_date: DateTime<Utc>,
    pub shared_link: Option<String>,
}

impl SortKeyed for Image {
    fn sort_key(&self) -> SortKey {
        self.image_id
    }
}

impl SortKeyed for Album {
    fn sort_key(&self) -> SortKey {
        self.album_id
    }
}

/// One listing request on behalf of `owner_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub owner_id: Uuid,
    pub mode: PaginationMode,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub album_id: Option<i64>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub next_cursor: Option<String>,
    pub previous_cursor: Option<String>,
}

impl ListQuery {
    /// First offset page with default limit.
    pub fn for_owner(owner_id: Uuid) -> Self {
        Self {
            owner_id,
            mode: PaginationMode::Offset,
            page: None,
            limit: None,
            album_id: None,
            from: None,
            to: None,
            next_cursor: None,
            previous_cursor: None,
        }
    }

    pub fn to_page_request(&self) -> PageRequest {
        PageRequest {
            mode: self.mode,
            page: self.page,
            limit: self.limit,
            filter: FilterParams {
                owner_id: Some(self.owner_id),
                album_id: self.album_id,
                from: self.from,
                to: self.to,
                next_cursor: self.next_cursor.clone(),
                previous_cursor: self.previous_cursor.clone(),
            },
        }
    }
}
