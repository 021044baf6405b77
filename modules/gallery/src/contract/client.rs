use async_trait::async_trait;

use crate::contract::model::{Album, Image, ListQuery};
use paging_core::Page;

/// Public API of the gallery module for in-process consumers.
///
/// Errors are `anyhow::Error` wrapping a [`crate::contract::GalleryError`].
#[async_trait]
pub trait GalleryApi: Send + Sync {
    /// One page of the owner's images, faces included.
    async fn list_images(&self, query: ListQuery) -> anyhow::Result<Page<Image>>;

    /// One page of the owner's albums. `album_id` is not accepted here.
    async fn list_albums(&self, query: ListQuery) -> anyhow::Result<Page<Album>>;
}
