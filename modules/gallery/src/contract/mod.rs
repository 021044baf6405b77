pub mod client;
pub mod error;
pub mod model;

pub use client::GalleryApi;
pub use error::GalleryError;
pub use model::{Album, BoundingBox, Face, Image, ListQuery};
pub use paging_core::{Page, PageInfo, PaginationMode};
