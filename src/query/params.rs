//! Raw listing parameters and their conversion into a typed query.
//!
//! Every parameter arrives as an optional string so a malformed value can
//! be reported through the API error envelope instead of failing inside
//! the extractor. Blank strings count as absent.

use serde::Deserialize;
use thiserror::Error;

use super::filter::{AuthorPattern, InventoryFilter, PriceRange};
use super::sort::{SortDirection, SortKey, SortSpec};

/// Page number used when `pages` is absent or unreadable.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when `limit` is absent or unreadable.
pub const DEFAULT_LIMIT: i64 = 10;

/// Query-string parameters accepted by the inventory listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryParams {
    pub author: Option<String>,
    pub year: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub condition: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub pages: Option<String>,
    pub limit: Option<String>,
}

/// Rejected listing parameters.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid value '{value}' for query parameter '{param}'")]
    InvalidParam { param: &'static str, value: String },

    #[error("unknown sort key '{0}'")]
    UnknownSortKey(String),

    #[error("invalid authorName filter: {0}")]
    AuthorPattern(#[from] regex::Error),
}

/// Pagination window over a filtered, sorted result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
}

impl PageWindow {
    /// Records to drop before the window. Never negative, so a page
    /// before the first clamps to the start, and an absurdly large page
    /// saturates instead of overflowing.
    pub fn skip(&self) -> usize {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.limit)
            .max(0) as usize
    }

    /// Records the window holds. A non-positive limit yields nothing.
    pub fn take(&self) -> usize {
        self.limit.max(0) as usize
    }

    /// Page count for a matching-record total under this window's limit.
    pub fn total_pages(&self, total: usize) -> i64 {
        if self.limit <= 0 {
            0
        } else {
            // div_ceil on signed integers is still unstable
            (total as u64).div_ceil(self.limit as u64) as i64
        }
    }
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Fully typed listing query: what to keep, how to order it, which slice
/// to return.
#[derive(Debug, Clone, Default)]
pub struct InventoryQuery {
    pub filter: InventoryFilter,
    pub sort: SortSpec,
    pub page: PageWindow,
}

impl InventoryParams {
    /// Converts raw parameters into a typed query.
    ///
    /// Numeric filter values must parse in full; `pages` and `limit` fall
    /// back to their defaults instead. The price range only applies when
    /// both bounds are present.
    pub fn into_query(self) -> Result<InventoryQuery, QueryError> {
        let mut filter = InventoryFilter::default();

        if let Some(author) = non_empty(self.author) {
            filter.author = Some(AuthorPattern::compile(&author)?);
        }

        if let Some(raw) = non_empty(self.year) {
            let year = raw.trim().parse::<i64>().map_err(|_| QueryError::InvalidParam {
                param: "year",
                value: raw,
            })?;
            filter.year = Some(year);
        }

        match (non_empty(self.min_price), non_empty(self.max_price)) {
            (Some(min_raw), Some(max_raw)) => {
                let min = parse_price("minPrice", &min_raw)?;
                let max = parse_price("maxPrice", &max_raw)?;
                filter.price = Some(PriceRange { min, max });
            }
            // A lone bound is ignored, matching the published behavior.
            _ => {}
        }

        if let Some(condition) = non_empty(self.condition) {
            filter.condition = Some(condition);
        }

        let sort = match non_empty(self.sort_by) {
            Some(raw) => {
                let key =
                    SortKey::from_str(&raw).ok_or_else(|| QueryError::UnknownSortKey(raw))?;
                let direction = match non_empty(self.order) {
                    Some(order) if order == "desc" => SortDirection::Desc,
                    _ => SortDirection::Asc,
                };
                SortSpec { key, direction }
            }
            // Without a sort key the order parameter has no effect.
            None => SortSpec::default(),
        };

        let page = PageWindow {
            page: parse_or(self.pages, DEFAULT_PAGE),
            limit: parse_or(self.limit, DEFAULT_LIMIT),
        };

        Ok(InventoryQuery { filter, sort, page })
    }
}

/// Treats an empty or whitespace-only string the same as an absent
/// parameter.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn parse_price(param: &'static str, raw: &str) -> Result<f64, QueryError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite())
        .ok_or_else(|| QueryError::InvalidParam {
            param,
            value: raw.to_string(),
        })
}

fn parse_or(value: Option<String>, default: i64) -> i64 {
    value
        .and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(default)
}
