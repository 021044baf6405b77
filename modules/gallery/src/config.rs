use paging_core::PagingConfig;
use serde::{Deserialize, Serialize};

/// `modules.gallery` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct GalleryConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Create missing tables on startup (SQLite/dev).
    #[serde(default)]
    pub bootstrap_schema: bool,
    #[serde(default)]
    pub paging: PagingConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            bootstrap_schema: false,
            paging: PagingConfig::default(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8087".to_string()
}
