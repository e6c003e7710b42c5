//! Predicate filtering for inventory queries.
//!
//! All predicates are conjunctive: a record must satisfy every present
//! filter to appear in a listing. Absent filters match everything.

use regex::Regex;

use crate::model::Comic;

/// Case-insensitive, word-bounded author match.
///
/// The raw filter text is split on whitespace and each token is matched
/// literally, so `"alan moore"` finds "Alan  Moore" but regex
/// metacharacters in the input never reach the engine.
#[derive(Debug, Clone)]
pub struct AuthorPattern {
    regex: Regex,
}

impl AuthorPattern {
    pub fn compile(raw: &str) -> Result<Self, regex::Error> {
        let tokens: Vec<String> = raw
            .split_whitespace()
            .map(|token| regex::escape(token))
            .collect();

        let pattern = format!(r"(?i)\b{}\b", tokens.join(r"\s+"));

        Ok(Self {
            regex: Regex::new(&pattern)?,
        })
    }

    pub fn is_match(&self, author_name: &str) -> bool {
        self.regex.is_match(author_name)
    }
}

/// Inclusive price interval. Only constructed when both bounds are given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// The full set of listing predicates, all optional.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub author: Option<AuthorPattern>,
    pub year: Option<i64>,
    pub price: Option<PriceRange>,
    /// Kept as the raw filter text: a value outside the known conditions
    /// matches no record rather than erroring.
    pub condition: Option<String>,
}

impl InventoryFilter {
    /// Checks whether a record satisfies every present predicate.
    pub fn matches(&self, comic: &Comic) -> bool {
        if let Some(pattern) = &self.author {
            if !pattern.is_match(&comic.author_name) {
                return false;
            }
        }

        if let Some(year) = self.year {
            if comic.year_of_publication != year {
                return false;
            }
        }

        if let Some(range) = &self.price {
            if !range.contains(comic.price) {
                return false;
            }
        }

        if let Some(condition) = &self.condition {
            if comic.condition.as_str() != condition {
                return false;
            }
        }

        true
    }

    pub fn is_unfiltered(&self) -> bool {
        self.author.is_none()
            && self.year.is_none()
            && self.price.is_none()
            && self.condition.is_none()
    }
}
