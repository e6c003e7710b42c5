//! Inventory query pipeline.
//!
//! Raw query-string parameters come in as strings, get checked once, and
//! leave as a typed `InventoryQuery` (filter + sort + page window). The
//! store layer only ever sees the typed form.

mod filter;
mod params;
mod sort;

pub use filter::{AuthorPattern, InventoryFilter, PriceRange};
pub use params::{
    InventoryParams, InventoryQuery, PageWindow, QueryError, DEFAULT_LIMIT, DEFAULT_PAGE,
};
pub use sort::{SortDirection, SortKey, SortSpec};
