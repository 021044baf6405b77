pub mod album_images;
pub mod albums;
pub mod faces;
pub mod images;
