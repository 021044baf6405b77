//! SeaORM backing for `paging-core`.
//!
//! An entity opts in by implementing [`PagedEntity`]; [`EntitySource`] then
//! serves it to the paginators over any `ConnectionTrait`.

mod condition;
mod entity;
mod source;

pub use condition::{filter_to_condition, FilterBuildError, PagedSelectExt};
pub use entity::PagedEntity;
pub use source::EntitySource;
