use async_trait::async_trait;

use crate::filter::Filter;
use crate::registry::Collection;
use crate::SortKey;

/// A record that can be paginated: it exposes its identity column.
pub trait SortKeyed {
    fn sort_key(&self) -> SortKey;
}

/// Bounded fetch window. `None` means "no bound".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Window {
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

impl Window {
    pub fn take(take: u64) -> Self {
        Self {
            skip: None,
            take: Some(take),
        }
    }

    pub fn slice(skip: u64, take: u64) -> Self {
        Self {
            skip: Some(skip),
            take: Some(take),
        }
    }
}

/// Per-collection query capability the paginators run against.
///
/// Implementations must apply every predicate of the filter and order by the
/// sort key in `filter.order()`. Associations the caller expects (e.g. faces
/// of an image) are materialized by the implementation.
#[async_trait]
pub trait RecordSource: Send + Sync {
    type Record: SortKeyed + Send;

    /// The collection this source reads.
    fn collection(&self) -> Collection;

    async fn count(&self, filter: &Filter) -> anyhow::Result<u64>;

    async fn find_many(&self, filter: &Filter, window: Window)
        -> anyhow::Result<Vec<Self::Record>>;
}
