//! Offset and keyset paginators.
//!
//! Both strategies share the filter step and the allow-list check; only the
//! store calls suspend. Every store call runs under the configured deadline.

use std::cmp::Reverse;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::PagingConfig;
use crate::cursor;
use crate::filter::{Direction, Filter, FilterBuilder, FilterParams};
use crate::page::{CursorPageInfo, OffsetPageInfo, Page};
use crate::registry::{Collection, EntityRegistry};
use crate::source::{RecordSource, SortKeyed, Window};
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    #[default]
    Offset,
    Cursor,
}

impl FromStr for PaginationMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "offset" => Ok(Self::Offset),
            "cursor" => Ok(Self::Cursor),
            other => Err(Error::invalid_request(format!(
                "unknown pagination type: {other}"
            ))),
        }
    }
}

/// One pagination call as received from the calling service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRequest {
    pub mode: PaginationMode,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub filter: FilterParams,
}

/// Stateless pagination engine; cheap to clone and share between callers.
#[derive(Clone, Debug)]
pub struct Paginator {
    registry: EntityRegistry,
    filters: FilterBuilder,
    default_limit: u64,
    max_limit: u64,
    timeout: Duration,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(&PagingConfig::default())
    }
}

impl Paginator {
    pub fn new(cfg: &PagingConfig) -> Self {
        Self {
            registry: EntityRegistry::new(cfg.collections.iter().copied()),
            filters: FilterBuilder::new(cfg.cursor_policy),
            default_limit: cfg.default_limit.max(1),
            max_limit: cfg.max_limit.max(1),
            timeout: cfg.query_timeout(),
        }
    }

    /// Dispatch on the requested mode and widen the metadata.
    pub async fn paginate<S>(
        &self,
        collection: &str,
        request: &PageRequest,
        source: &S,
    ) -> Result<Page<S::Record>>
    where
        S: RecordSource + ?Sized,
    {
        match request.mode {
            PaginationMode::Offset => self
                .offset(collection, request.page, request.limit, &request.filter, source)
                .await
                .map(Page::erase),
            PaginationMode::Cursor => self
                .cursor(collection, request.limit, &request.filter, source)
                .await
                .map(Page::erase),
        }
    }

    #[instrument(name = "paging.offset", skip_all, fields(collection = %collection))]
    pub async fn offset<S>(
        &self,
        collection: &str,
        page: Option<i64>,
        limit: Option<i64>,
        params: &FilterParams,
        source: &S,
    ) -> Result<Page<S::Record, OffsetPageInfo>>
    where
        S: RecordSource + ?Sized,
    {
        let target = self.target(collection, source)?;
        let page = resolve_page(page)?;
        let limit = self.resolve_limit(limit)?;
        let skip = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| Error::invalid_request("page is out of range"))?;

        let (filter, _) = self.filters.build(&params.without_cursors())?;
        target.check_filter(&filter)?;

        let total = self.guard("count", source.count(&filter)).await?;
        let items = if skip >= total {
            // Past the last page: nothing to fetch.
            Vec::new()
        } else {
            self.guard("find_many", source.find_many(&filter, Window::slice(skip, limit)))
                .await?
        };

        let info = OffsetPageInfo::compute(total, page, limit);
        debug!(
            total,
            page,
            limit,
            returned = items.len(),
            total_pages = info.total_pages,
            "offset page served"
        );
        Ok(Page::new(items, info))
    }

    #[instrument(name = "paging.cursor", skip_all, fields(collection = %collection))]
    pub async fn cursor<S>(
        &self,
        collection: &str,
        limit: Option<i64>,
        params: &FilterParams,
        source: &S,
    ) -> Result<Page<S::Record, CursorPageInfo>>
    where
        S: RecordSource + ?Sized,
    {
        let target = self.target(collection, source)?;
        let limit = self.resolve_limit(limit)?;
        let (filter, direction) = self.filters.build(params)?;
        target.check_filter(&filter)?;

        let rows = self.fetch_window(source, &filter, limit).await?;
        let page = assemble_cursor_page(rows, limit, direction);
        debug!(
            ?direction,
            returned = page.items.len(),
            has_more_items = page.pagination.has_more_items,
            "cursor page served"
        );
        Ok(page)
    }

    /// Over-fetch by one: the extra row is the only signal that another page
    /// exists in the direction queried.
    async fn fetch_window<S>(
        &self,
        source: &S,
        filter: &Filter,
        limit: u64,
    ) -> Result<Vec<S::Record>>
    where
        S: RecordSource + ?Sized,
    {
        let take = limit.saturating_add(1);
        self.guard("find_many", source.find_many(filter, Window::take(take)))
            .await
    }

    fn target<S>(&self, collection: &str, source: &S) -> Result<Collection>
    where
        S: RecordSource + ?Sized,
    {
        let target = self.registry.resolve(collection)?;
        if source.collection() != target {
            return Err(Error::invalid_request(format!(
                "collection `{target}` cannot be served by a `{}` source",
                source.collection()
            )));
        }
        Ok(target)
    }

    fn resolve_limit(&self, requested: Option<i64>) -> Result<u64> {
        match requested {
            None => Ok(self.default_limit.min(self.max_limit)),
            Some(l) if l < 1 => Err(Error::invalid_request("limit must be 1 or greater")),
            Some(l) => Ok((l as u64).min(self.max_limit)),
        }
    }

    async fn guard<T, F>(&self, op: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(v)) => Ok(v),
            Ok(Err(e)) => Err(Error::store(e)),
            Err(_) => {
                warn!(op, timeout = ?self.timeout, "store call exceeded its deadline");
                Err(Error::Timeout {
                    after: self.timeout,
                })
            }
        }
    }
}

fn resolve_page(requested: Option<i64>) -> Result<u64> {
    match requested {
        None => Ok(1),
        Some(p) if p < 1 => Err(Error::invalid_request("page index must be 1 or greater")),
        Some(p) => Ok(p as u64),
    }
}

/// Turn an over-fetched batch (`limit + 1` at most) into a cursor page.
///
/// Forward and first pages come back ascending, backward pages descending.
/// In both cases the surplus row, if any, is the one farthest from the anchor
/// and therefore the last one of the batch.
pub fn assemble_cursor_page<R: SortKeyed>(
    mut rows: Vec<R>,
    limit: u64,
    direction: Direction,
) -> Page<R, CursorPageInfo> {
    let overfetched = rows.len() as u64 > limit;

    let (has_next, has_previous) = match direction {
        Direction::FirstPage => {
            rows.sort_by_key(SortKeyed::sort_key);
            (overfetched, false)
        }
        Direction::Forward(_) => {
            rows.sort_by_key(SortKeyed::sort_key);
            (overfetched, !rows.is_empty())
        }
        Direction::Backward(_) => {
            rows.sort_by_key(|r| Reverse(r.sort_key()));
            // We came here from a later page, so one exists; an earlier one
            // exists only if the surplus row showed up.
            (true, overfetched)
        }
    };

    if overfetched {
        rows.truncate(limit as usize);
    }

    let lowest = rows.iter().map(SortKeyed::sort_key).min();
    let highest = rows.iter().map(SortKeyed::sort_key).max();

    let pagination = CursorPageInfo {
        next_cursor: highest.filter(|_| has_next).map(cursor::encode),
        previous_cursor: lowest.filter(|_| has_previous).map(cursor::encode),
        limit,
        has_more_items: has_next || has_previous,
    };
    Page::new(rows, pagination)
}
