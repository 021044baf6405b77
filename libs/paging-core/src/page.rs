use serde::{Deserialize, Serialize};

/// Offset-mode metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetPageInfo {
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

impl OffsetPageInfo {
    /// Derive the metadata for `page` (1-based) of `total` records.
    /// `page` and `limit` below 1 are read as 1; offsets saturate at `u64::MAX`.
    pub fn compute(total: u64, page: u64, limit: u64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let skip = (page - 1).saturating_mul(limit);
        let total_pages = total.div_ceil(limit);
        Self {
            total,
            current_page: page,
            limit,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > 1,
            is_first_page: page == 1,
            is_last_page: page == total_pages,
            item_start: skip.saturating_add(1),
            item_end: skip.saturating_add(limit).min(total),
        }
    }
}

/// Cursor-mode metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPageInfo {
    pub next_cursor: Option<String>,
    pub previous_cursor: Option<String>,
    pub limit: u64,
    pub has_more_items: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageInfo {
    Offset(OffsetPageInfo),
    Cursor(CursorPageInfo),
}

impl From<OffsetPageInfo> for PageInfo {
    fn from(info: OffsetPageInfo) -> Self {
        Self::Offset(info)
    }
}

impl From<CursorPageInfo> for PageInfo {
    fn from(info: CursorPageInfo) -> Self {
        Self::Cursor(info)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Page<T, I = PageInfo> {
    pub items: Vec<T>,
    pub pagination: I,
}

impl<T, I> Page<T, I> {
    /// Create a new page with items and pagination metadata
    pub fn new(items: Vec<T>, pagination: I) -> Self {
        Self { items, pagination }
    }

    /// Map items while preserving the metadata (record -> DTO conversion)
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U, I> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    /// Widen the metadata into the mode-agnostic [`PageInfo`].
    pub fn erase(self) -> Page<T, PageInfo>
    where
        I: Into<PageInfo>,
    {
        Page {
            items: self.items,
            pagination: self.pagination.into(),
        }
    }
}
