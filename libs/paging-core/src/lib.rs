//! Entity-agnostic read path: offset and keyset pagination over a
//! [`RecordSource`], sharing a single filter-construction step.

pub mod config;
pub mod cursor;
pub mod error;
pub mod filter;
pub mod page;
pub mod paginator;
pub mod registry;
pub mod source;

/// Identity column value that totally orders a collection.
pub type SortKey = i64;

pub use config::PagingConfig;
pub use cursor::{CursorError, CursorPolicy};
pub use error::{Error, Result};
pub use filter::{Boundary, DateRange, Direction, Filter, FilterBuilder, FilterParams, SortDir};
pub use page::{CursorPageInfo, OffsetPageInfo, Page, PageInfo};
pub use paginator::{assemble_cursor_page, PageRequest, PaginationMode, Paginator};
pub use registry::{Collection, EntityRegistry};
pub use source::{RecordSource, SortKeyed, Window};
