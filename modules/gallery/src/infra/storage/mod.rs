pub mod entity;
pub mod mapper;
pub mod paged;
pub mod schema;
pub mod seed;
pub mod sources;

pub use sources::{AlbumSource, ImageSource};
