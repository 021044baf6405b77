use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cursor::CursorPolicy;
use crate::registry::Collection;

/// Tunables of the pagination engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagingConfig {
    #[serde(default = "default_limit")]
    pub default_limit: u64,
    #[serde(default = "default_max_limit")]
    pub max_limit: u64,
    #[serde(default = "default_query_timeout_ms")]
    pub query_timeout_ms: u64,
    #[serde(default)]
    pub cursor_policy: CursorPolicy,
    /// Runtime allow-list of queryable collections.
    #[serde(default = "default_collections")]
    pub collections: Vec<Collection>,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            query_timeout_ms: default_query_timeout_ms(),
            cursor_policy: CursorPolicy::default(),
            collections: default_collections(),
        }
    }
}

impl PagingConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

fn default_limit() -> u64 {
    10
}

fn default_max_limit() -> u64 {
    100
}

fn default_query_timeout_ms() -> u64 {
    5000
}

fn default_collections() -> Vec<Collection> {
    Collection::ALL.to_vec()
}
