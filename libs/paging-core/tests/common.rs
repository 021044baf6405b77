//! Shared in-memory stores for the engine tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use paging_core::{Collection, Filter, RecordSource, SortDir, SortKeyed, Window};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: i64,
    pub owner: Uuid,
    pub uploaded_at: DateTime<Utc>,
    pub albums: Vec<i64>,
}

impl SortKeyed for Photo {
    fn sort_key(&self) -> i64 {
        self.id
    }
}

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    day(y, m, d).and_hms_opt(h, 0, 0).unwrap().and_utc()
}

pub fn ids(photos: &[Photo]) -> Vec<i64> {
    photos.iter().map(|p| p.id).collect()
}

/// Evaluates filters the way a relational store would.
pub struct MemorySource {
    collection: Collection,
    rows: Vec<Photo>,
}

impl MemorySource {
    pub fn new(rows: Vec<Photo>) -> Self {
        Self {
            collection: Collection::Images,
            rows,
        }
    }

    pub fn as_collection(mut self, collection: Collection) -> Self {
        self.collection = collection;
        self
    }

    /// `n` photos with ids `1..=n`, one per day starting 2024-01-01.
    pub fn sequential(owner: Uuid, n: i64) -> Self {
        let start = at(2024, 1, 1, 12);
        let rows = (1..=n)
            .map(|id| Photo {
                id,
                owner,
                uploaded_at: start + chrono::Duration::days(id - 1),
                albums: Vec::new(),
            })
            .collect();
        Self::new(rows)
    }

    pub fn link(&mut self, photo: i64, album: i64) {
        if let Some(p) = self.rows.iter_mut().find(|p| p.id == photo) {
            p.albums.push(album);
        }
    }

    pub fn unlink(&mut self, photo: i64, album: i64) {
        if let Some(p) = self.rows.iter_mut().find(|p| p.id == photo) {
            p.albums.retain(|a| *a != album);
        }
    }

    fn matching(&self, filter: &Filter) -> Vec<Photo> {
        self.rows
            .iter()
            .filter(|p| filter.owner_id().map_or(true, |o| p.owner == o))
            .filter(|p| filter.album_id().map_or(true, |a| p.albums.contains(&a)))
            .filter(|p| filter.date_range().map_or(true, |r| r.contains(p.uploaded_at)))
            .filter(|p| filter.boundary().map_or(true, |b| b.admits(p.id)))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    type Record = Photo;

    fn collection(&self) -> Collection {
        self.collection
    }

    async fn count(&self, filter: &Filter) -> anyhow::Result<u64> {
        Ok(self.matching(filter).len() as u64)
    }

    async fn find_many(&self, filter: &Filter, window: Window) -> anyhow::Result<Vec<Photo>> {
        let mut rows = self.matching(filter);
        rows.sort_by_key(|p| p.id);
        if filter.order() == SortDir::Desc {
            rows.reverse();
        }
        let skip = window.skip.unwrap_or(0) as usize;
        let take = window.take.map_or(usize::MAX, |t| t as usize);
        Ok(rows.into_iter().skip(skip).take(take).collect())
    }
}

/// Counts every store call that reaches it.
pub struct SpySource {
    inner: MemorySource,
    pub calls: Arc<AtomicUsize>,
}

impl SpySource {
    pub fn new(inner: MemorySource) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for SpySource {
    type Record = Photo;

    fn collection(&self) -> Collection {
        self.inner.collection()
    }

    async fn count(&self, filter: &Filter) -> anyhow::Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.count(filter).await
    }

    async fn find_many(&self, filter: &Filter, window: Window) -> anyhow::Result<Vec<Photo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_many(filter, window).await
    }
}

/// Never answers within any reasonable deadline.
pub struct SlowSource {
    pub delay: Duration,
}

#[async_trait]
impl RecordSource for SlowSource {
    type Record = Photo;

    fn collection(&self) -> Collection {
        Collection::Images
    }

    async fn count(&self, _filter: &Filter) -> anyhow::Result<u64> {
        tokio::time::sleep(self.delay).await;
        Ok(0)
    }

    async fn find_many(&self, _filter: &Filter, _window: Window) -> anyhow::Result<Vec<Photo>> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }
}

/// Always fails.
pub struct BrokenSource;

#[async_trait]
impl RecordSource for BrokenSource {
    type Record = Photo;

    fn collection(&self) -> Collection {
        Collection::Images
    }

    async fn count(&self, _filter: &Filter) -> anyhow::Result<u64> {
        anyhow::bail!("connection reset")
    }

    async fn find_many(&self, _filter: &Filter, _window: Window) -> anyhow::Result<Vec<Photo>> {
        anyhow::bail!("connection reset")
    }
}
