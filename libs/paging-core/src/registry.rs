//! Closed set of queryable collections plus the runtime allow-list.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Images,
    Albums,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Images, Collection::Albums];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Images => "images",
            Collection::Albums => "albums",
        }
    }

    /// Whether records of this collection can be linked to an album.
    pub fn supports_membership(self) -> bool {
        matches!(self, Collection::Images)
    }

    /// Reject predicates this collection has no column for.
    pub fn check_filter(self, filter: &Filter) -> Result<()> {
        if filter.album_id().is_some() && !self.supports_membership() {
            return Err(Error::invalid_request(format!(
                "`albumId` is not a valid filter for {self}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Collection::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| Error::invalid_request(format!("unknown collection: {s}")))
    }
}

/// Allow-list of collection names a request may address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityRegistry {
    allowed: BTreeSet<Collection>,
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new(Collection::ALL)
    }
}

impl EntityRegistry {
    pub fn new(allowed: impl IntoIterator<Item = Collection>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn is_queryable(&self, name: &str) -> bool {
        name.parse::<Collection>()
            .is_ok_and(|c| self.allowed.contains(&c))
    }

    /// Resolve a caller-supplied name, failing fast for anything off the list.
    pub fn resolve(&self, name: &str) -> Result<Collection> {
        match name.parse::<Collection>() {
            Ok(c) if self.allowed.contains(&c) => Ok(c),
            _ => Err(Error::invalid_request(format!(
                "collection `{name}` is not queryable"
            ))),
        }
    }
}
