//! `paging_core::Filter` → `sea_orm::Condition`.

use paging_core::{Boundary, Collection, Filter, SortDir, Window};
use sea_orm::sea_query::Order;
use sea_orm::{ColumnTrait, Condition, QueryFilter, QueryOrder, QuerySelect};
use thiserror::Error;

use crate::PagedEntity;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterBuildError {
    #[error("{collection} has no owner column")]
    NoOwner { collection: Collection },

    #[error("{collection} cannot be filtered by album")]
    NoMembership { collection: Collection },
}

/// Translate every predicate of `filter` for entity `E`. Ordering is not part
/// of the condition; see [`PagedSelectExt::order_by_sort_key`].
pub fn filter_to_condition<E: PagedEntity>(filter: &Filter) -> Result<Condition, FilterBuildError> {
    let mut cond = Condition::all();

    if let Some(owner) = filter.owner_id() {
        let col = E::owner_column().ok_or(FilterBuildError::NoOwner {
            collection: E::COLLECTION,
        })?;
        cond = cond.add(col.eq(owner));
    }

    if let Some(album_id) = filter.album_id() {
        let expr = E::membership(album_id).ok_or(FilterBuildError::NoMembership {
            collection: E::COLLECTION,
        })?;
        cond = cond.add(expr);
    }

    if let Some(range) = filter.date_range() {
        let ts = E::timestamp_column();
        if let Some(start) = range.start() {
            cond = cond.add(ts.gte(start));
        }
        if let Some(end) = range.end_exclusive() {
            cond = cond.add(ts.lt(end));
        }
    }

    if let Some(boundary) = filter.boundary() {
        let key = E::sort_key_column();
        cond = cond.add(match boundary {
            Boundary::After(k) => key.gt(k),
            Boundary::Before(k) => key.lt(k),
        });
    }

    Ok(cond)
}

/// Paging helpers for a plain `Select<E>`.
pub trait PagedSelectExt<E: PagedEntity>: Sized {
    fn apply_paging_filter(self, filter: &Filter) -> Result<Self, FilterBuildError>;

    fn order_by_sort_key(self, dir: SortDir) -> Self;

    fn apply_window(self, window: Window) -> Self;
}

impl<E: PagedEntity> PagedSelectExt<E> for sea_orm::Select<E> {
    fn apply_paging_filter(self, filter: &Filter) -> Result<Self, FilterBuildError> {
        let cond = filter_to_condition::<E>(filter)?;
        Ok(self.filter(cond))
    }

    fn order_by_sort_key(self, dir: SortDir) -> Self {
        let order = match dir {
            SortDir::Asc => Order::Asc,
            SortDir::Desc => Order::Desc,
        };
        self.order_by(E::sort_key_column(), order)
    }

    fn apply_window(self, window: Window) -> Self {
        self.offset(window.skip).limit(window.take)
    }
}
