use paging_core::{Collection, SortKey};
use sea_orm::sea_query::SimpleExpr;
use sea_orm::EntityTrait;

/// Column mapping that lets an entity be filtered and ordered by the engine.
pub trait PagedEntity: EntityTrait {
    const COLLECTION: Collection;

    /// Unique, totally ordered identity column.
    fn sort_key_column() -> Self::Column;

    /// Column holding the owning user, if the entity has one.
    fn owner_column() -> Option<Self::Column>;

    /// Column the date range applies to.
    fn timestamp_column() -> Self::Column;

    /// "Linked to album `album_id`" as a predicate on this entity.
    fn membership(_album_id: SortKey) -> Option<SimpleExpr> {
        None
    }
}
